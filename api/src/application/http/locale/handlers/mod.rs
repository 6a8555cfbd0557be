pub mod get_messages;
