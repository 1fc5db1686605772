use std::env;

use bitdt::epoch::{self, Mode};
use bitdt::BitDateTime;


fn main() {
    let now = bitdt::now_millis();
    println!("It is {} milliseconds since the epoch", now);

    for &base in [ 2, 8, 10, 16, 32, 36 ].iter() {
        let text = epoch::to_text(now, None, Mode::Base(base));
        println!("  base {:2}: {} ({} chars)", base, text, text.len());
    }

    let full = epoch::to_text(now, None, Mode::Full);
    println!("  encoded: {} = {:?}", full, BitDateTime::decode(&full));

    for tz in env::args().skip(1) {
        let text = epoch::to_text(now, Some(&tz), Mode::Auto);
        match epoch::from_text(&text, None) {
            Some(back) => println!("It is {} in {} ({:?}), {} ms", text, tz, BitDateTime::decode(&text), back),
            None       => println!("Error: could not read {:?} back", text),
        }
    }
}
