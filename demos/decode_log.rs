use std::{env, fs::File};

use anyhow::Context;
use nmea0183_stream::{DecodedRecord, Event, Session, SessionConfig};

fn print(record: &DecodedRecord) {
    match record {
        DecodedRecord::PositionFix(gga) => println!("{gga:#}\n"),
        DecodedRecord::SatelliteStatus(gsa) => {
            let used: Vec<_> = gsa.used_satellites().filter_map(|s| s.id()).collect();
            println!("GSA {} satellites {used:?}", gsa.mode());
        }
        other => {
            if let Some((latitude, longitude)) = other.position() {
                println!("{} {latitude} {longitude}", other.sentence_type());
            } else {
                println!("{other:?}");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .context("usage: decode_log <nmea log file>")?;
    let file = File::open(&path).with_context(|| format!("cannot open {path}"))?;

    // a file never idles, so the timeout does not apply
    let config = SessionConfig::default().idle_timeout(None);

    let mut rejected = 0;
    for event in Session::new(file, config) {
        match event? {
            Event::Record(record) => print(&record),
            Event::Rejected(e) => {
                rejected += 1;
                eprintln!("rejected: {e}");
            }
        }
    }

    println!("{rejected} sentences rejected");
    Ok(())
}
