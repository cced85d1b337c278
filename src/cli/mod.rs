mod commands;
mod handlers;

pub use commands::{
    AreaAction, AreaCommand, BiAction, BiCommand, BiFields, Cli, Commands, PageAction,
    PageCommand, PageFields, SaveAction, SaveCommand,
};
pub use handlers::{
    find_project_root, handle_area_add, handle_area_delete, handle_area_list, handle_area_update,
    handle_bi_add, handle_bi_delete, handle_bi_get, handle_bi_list, handle_bi_update,
    handle_check, handle_clear, handle_compare, handle_export, handle_export_sheets,
    handle_import, handle_init, handle_page_add, handle_page_delete, handle_page_update,
    handle_save_create, handle_save_delete, handle_save_list, handle_save_show, handle_stats,
};
