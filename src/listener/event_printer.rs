use super::Listener;
use crate::control::string::tiles_to_string;
use crate::model::*;
use crate::util::misc::vec_to_string;

// [EventPrinter]
// イベントと局の状態を標準出力に表示 (デバッグ用)
#[derive(Debug, Default)]
pub struct EventPrinter {}

impl EventPrinter {
    pub fn new() -> Self {
        Self {}
    }

    fn print_score_change(&self, stg: &Stage, d_scores: &[Point; SEAT]) {
        for s in 0..SEAT {
            let delta = d_scores[s];
            let new = stg.players[s].score;
            let old = new - delta;
            println!("player {}: {} -> {} ({:+})", s, old, new, delta);
        }
        println!();
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &Stage, event: &Event) {
        use Event::*;
        print!("(step:{}) ", stg.step);
        let pl = &stg.players[stg.turn];
        match event {
            New(_) => {
                println!("New");
                println!("{}", stg);
            }
            Deal(e) => {
                let r = if e.is_replacement { " (replacement)" } else { "" };
                println!("Deal {}{}", e.tile, r);
                println!("{}", pl);
            }
            Discard(e) => {
                let r = if e.is_riichi { " riichi" } else { "" };
                println!("Discard {}{}", e.tile, r);
                println!("{}", pl);
            }
            Meld(e) => {
                println!("Meld {:?} {}", e.action, e.meld);
                println!("{}", pl);
            }
            Dora(e) => {
                println!("Dora {}", e.tile);
            }
            Offer(e) => {
                println!("Offer {:?}", e.phase);
                for o in &e.offers {
                    println!("  seat {}: {}", o.seat, vec_to_string(&o.actions));
                }
            }
            Resolve(e) => {
                println!(
                    "Resolve {:?} by {:?} on {} from seat {}",
                    e.chosen, e.winners, e.target.1, e.target.0
                );
            }
            Win(e) => {
                println!("Win");
                println!("ura_dora: {}", vec_to_string(&e.ura_doras));
                for ctx in &e.contexts {
                    println!(
                        "seat {}: {} {} {}",
                        ctx.seat,
                        tiles_to_string(&ctx.hand),
                        ctx.winning_tile,
                        ctx.point
                    );
                    if !ctx.title.is_empty() {
                        println!("  {}", ctx.title);
                    }
                }
                self.print_score_change(stg, &e.delta_scores);
                println!("{}", stg);
            }
            Draw(e) => {
                println!("Draw {:?}", e.draw_type);
                for (s, h) in e.hands.iter().enumerate() {
                    if e.tenpais[s] {
                        println!("tenpai seat {}: {}", s, tiles_to_string(h));
                    }
                }
                println!("{}", stg);
                self.print_score_change(stg, &e.delta_scores);
            }
        }
        println!();
    }
}
