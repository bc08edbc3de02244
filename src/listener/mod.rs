// 局の進行を外部へ通知するためのリスナー
mod event_printer;
mod event_writer;

use std::fmt;

use crate::model::*;

pub use event_printer::EventPrinter;
pub use event_writer::EventWriter;

pub trait Listener: Send {
    // stgはeventを適用した後の状態
    fn notify_event(&mut self, _stg: &Stage, _event: &Event) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}
