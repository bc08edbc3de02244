// 局の進行制御と手牌操作の共通処理
pub mod common;
pub mod possible_actions;
pub mod round;
pub mod stage_controller;
pub mod string;
pub mod wall;

pub use round::{RoundController, RoundSetup};
pub use stage_controller::StageController;
