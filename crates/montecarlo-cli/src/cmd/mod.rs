pub mod analyze;
pub mod die;
pub mod game_args;
pub mod play;
pub mod sweep;
