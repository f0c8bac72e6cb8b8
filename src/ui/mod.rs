pub mod delete_confirmation_view;
pub mod service_form_view;
pub mod service_list_view;
pub mod top_bar_view;
