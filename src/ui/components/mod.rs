pub mod help;
pub mod home;
pub mod library;
pub mod player_bar;
pub mod queue;
pub mod search;
pub mod sidebar;
