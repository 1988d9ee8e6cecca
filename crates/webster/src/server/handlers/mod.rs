pub mod define;
pub mod lists;
pub mod logs;
pub mod status;
pub mod unknown_words;
