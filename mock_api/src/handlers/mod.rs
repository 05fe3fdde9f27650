pub mod users_handlers;
