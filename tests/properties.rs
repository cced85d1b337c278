use bidash::diff::{compare, CriticalityChange, StatusChange};
use bidash::entity::{Area, BiItem, Criticality, Page, Status, StatusCategory};
use bidash::filter::{filter_bis, FilterState};
use bidash::stats::{percent, summarize};
use bidash::transfer::{export_document, import_document};
use proptest::prelude::*;

const AREAS: [&str; 3] = ["BW", "RH", "Controladoria"];
const STATUSES: [&str; 8] = [
    "Atualizado",
    "Desatualizado",
    "Desatualizado desde 06/08/24",
    "Em revisão",
    "Descontinuado",
    "Sem responsável",
    "Sem permissão",
    "Não encontrado",
];

fn status() -> impl Strategy<Value = Status> {
    prop::sample::select(STATUSES.to_vec()).prop_map(Status::parse)
}

fn criticality() -> impl Strategy<Value = Criticality> {
    prop::sample::select(Criticality::ORDER.to_vec())
}

fn bi() -> impl Strategy<Value = BiItem> {
    (
        1u64..1000,
        0usize..6,
        prop::sample::select(vec!["Ana", "Bruno", ""]),
        prop::sample::subsequence(AREAS.to_vec(), 0..=3),
        status(),
        criticality(),
        0usize..4,
    )
        .prop_map(|(id, name, owner, areas, status, criticality, pages)| {
            let mut bi = BiItem::new(id, format!("BI {}", name));
            bi.owner = owner.to_string();
            bi.area = areas.into_iter().map(str::to_string).collect();
            bi.status = status;
            bi.criticality = criticality;
            bi.pages = (0..pages)
                .map(|i| Page::new(i as u64 + 1, format!("Página {}", i)))
                .collect();
            bi
        })
}

fn bis() -> impl Strategy<Value = Vec<BiItem>> {
    prop::collection::vec(bi(), 0..12)
}

fn filter_state() -> impl Strategy<Value = FilterState> {
    (
        prop::sample::select(vec!["", "bi 1", "ana", "bw", "zzz"]),
        prop::sample::subsequence(StatusCategory::ORDER.to_vec(), 0..=3),
        prop::sample::subsequence(Criticality::ORDER.to_vec(), 0..=4),
        prop::sample::subsequence(AREAS.to_vec(), 0..=3),
    )
        .prop_map(|(search, statuses, criticalities, areas)| {
            let mut state = FilterState::new();
            state.search = search.to_string();
            for category in statuses {
                state.statuses.select(category);
            }
            for criticality in criticalities {
                state.criticalities.select(criticality);
            }
            for area in areas {
                state.areas.select(area.to_string());
            }
            state
        })
}

fn mirrored_status(change: StatusChange) -> StatusChange {
    match change {
        StatusChange::New => StatusChange::Removed,
        StatusChange::Removed => StatusChange::New,
        StatusChange::Improved => StatusChange::Declined,
        StatusChange::Declined => StatusChange::Improved,
        StatusChange::Unchanged => StatusChange::Unchanged,
    }
}

fn mirrored_criticality(change: CriticalityChange) -> CriticalityChange {
    match change {
        CriticalityChange::Added => CriticalityChange::Removed,
        CriticalityChange::Removed => CriticalityChange::Added,
        CriticalityChange::Increased => CriticalityChange::Decreased,
        CriticalityChange::Decreased => CriticalityChange::Increased,
        CriticalityChange::Unchanged => CriticalityChange::Unchanged,
    }
}

proptest! {
    #[test]
    fn prop_summary_counts_are_bounded(bis in bis()) {
        let summary = summarize(&bis);
        prop_assert_eq!(summary.total, bis.len());
        prop_assert!(summary.updated + summary.outdated + summary.discontinued <= summary.total);
        prop_assert_eq!(
            summary.total_pages,
            bis.iter().map(|b| b.pages.len()).sum::<usize>()
        );
    }

    #[test]
    fn prop_percentages_in_range(bis in bis()) {
        let summary = summarize(&bis);
        for value in [
            summary.updated_percent(),
            summary.outdated_percent(),
            summary.discontinued_percent(),
        ] {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn prop_percent_of_zero_total_is_zero(count in 0usize..100) {
        prop_assert_eq!(percent(count, 0), 0.0);
    }

    #[test]
    fn prop_summary_ignores_order(mut bis in bis()) {
        let before = summarize(&bis);
        bis.reverse();
        prop_assert_eq!(summarize(&bis), before);
    }

    #[test]
    fn prop_filter_is_idempotent(bis in bis(), state in filter_state()) {
        let once = filter_bis(&bis, &state);
        let twice = filter_bis(&once, &state);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_filter_returns_subset(bis in bis(), state in filter_state()) {
        let filtered = filter_bis(&bis, &state);
        prop_assert!(filtered.len() <= bis.len());
        for bi in &filtered {
            prop_assert!(bis.contains(bi));
        }
    }

    #[test]
    fn prop_empty_filter_keeps_everything(bis in bis()) {
        prop_assert_eq!(filter_bis(&bis, &FilterState::new()), bis);
    }

    #[test]
    fn prop_diff_is_antisymmetric(left in bis(), right in bis()) {
        let forward = compare(&left, &right);
        let backward = compare(&right, &left);
        prop_assert_eq!(forward.records.len(), backward.records.len());

        for record in &forward.records {
            let mirror = backward.get(&record.name).unwrap();
            prop_assert_eq!(mirror.status_change, mirrored_status(record.status_change));
            prop_assert_eq!(
                mirror.criticality_change,
                mirrored_criticality(record.criticality_change)
            );
            prop_assert_eq!(mirror.pages_change, -record.pages_change);
            prop_assert_eq!(mirror.has_changes, record.has_changes);
        }
        prop_assert_eq!(forward.stats.improved, backward.stats.declined);
        prop_assert_eq!(forward.stats.new_bis, backward.stats.removed_bis);
        prop_assert_eq!(forward.stats.unchanged, backward.stats.unchanged);
    }

    #[test]
    fn prop_diff_with_itself_is_unchanged(bis in bis()) {
        let result = compare(&bis, &bis);
        for record in &result.records {
            prop_assert_eq!(record.status_change, StatusChange::Unchanged);
            prop_assert!(!record.has_changes);
        }
        prop_assert_eq!(result.stats.unchanged, result.records.len());
    }

    #[test]
    fn prop_export_import_round_trip(
        bis in bis(),
        area_names in prop::sample::subsequence(AREAS.to_vec(), 0..=3),
    ) {
        let areas: Vec<Area> = area_names
            .iter()
            .enumerate()
            .map(|(i, name)| Area::new(i as u64 + 1, name.to_string()))
            .collect();

        let json = export_document(&bis, &areas).unwrap();
        let imported = import_document(&json).unwrap();
        prop_assert_eq!(imported.bis, bis);
        prop_assert_eq!(imported.areas, areas);
    }
}
