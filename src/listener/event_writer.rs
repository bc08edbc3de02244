use std::io::Write;

use serde_json::{json, Value};

use super::Listener;
use crate::model::*;

// [EventWriter]
// 1局分のイベントを記録し,局の終了時にJSONの配列として1行で書き出す
#[derive(Debug)]
pub struct EventWriter<W: Write + Send> {
    writer: W,
    round_index: usize,
    record: Vec<Value>,
}

impl<W: Write + Send> EventWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            round_index: 0,
            record: vec![],
        }
    }

    // 書き出した局の数
    pub fn round_count(&self) -> usize {
        self.round_index
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn flush_record(&mut self) {
        let line = json!(self.record).to_string();
        if let Err(e) = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush()) {
            error!("failed to write round {}: {}", self.round_index, e);
        }
        self.record.clear();
        self.round_index += 1;
    }
}

impl<W: Write + Send> Listener for EventWriter<W> {
    fn notify_event(&mut self, _stg: &Stage, event: &Event) {
        let mut write = false;
        match event {
            Event::New(_) => {
                self.record.clear();
            }
            Event::Win(_) | Event::Draw(_) => {
                write = true;
            }
            _ => {}
        }

        self.record.push(json!(event));
        if write {
            self.flush_record();
        }
    }
}

#[test]
fn test_event_writer() {
    let mut w = EventWriter::new(vec![]);
    let stg = Stage::default();
    w.notify_event(&stg, &Event::dora(Tile(TM, 1)));
    w.notify_event(
        &stg,
        &Event::draw(DrawType::Exhaustive, [false; SEAT], Default::default(), [0; SEAT]),
    );
    assert_eq!(w.round_count(), 1);

    let buf = w.into_inner();
    let text = String::from_utf8(buf).unwrap();
    let v: Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(v[0]["type"], "Dora");
    assert_eq!(v[0]["tile"], "m1");
    assert_eq!(v[1]["type"], "Draw");
}
