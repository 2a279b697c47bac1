pub mod intake;
pub mod status_check;
