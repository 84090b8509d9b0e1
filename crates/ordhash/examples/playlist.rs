// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An example that uses an `OrderedHashMap` as a playlist: tracks are looked
//! up by title, played in the order they were queued, and skipped or
//! dropped while walking the queue.

use ordhash::{OrderedHashMap, ordered_hash_map};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Track {
    artist: &'static str,
    seconds: u32,
}

impl Track {
    fn new(artist: &'static str, seconds: u32) -> Self {
        Track { artist, seconds }
    }
}

fn print_queue(label: &str, queue: &OrderedHashMap<&'static str, Track>) {
    println!("{label}:");
    for (title, track) in queue {
        println!("  {title} ({}, {}s)", track.artist, track.seconds);
    }
}

fn main() {
    let mut queue = ordered_hash_map! {
        "Intro" => Track::new("The Openers", 95),
        "Long Drive" => Track::new("Highway", 412),
        "Interlude" => Track::new("The Openers", 40),
        "Finale" => Track::new("Encore", 260),
    };
    print_queue("queued", &queue);

    // Re-queueing a track updates it in place rather than moving it.
    queue.insert("Intro", Track::new("The Openers", 101));
    assert_eq!(queue.first_key(), &"Intro");

    // Someone asks for this one to play next.
    queue.push_front("Request", Track::new("Caller", 180));

    // Walk the queue with positions, dropping anything shorter than a minute.
    // `erase` hands back the position after the erased track.
    let mut position = queue.begin();
    while !position.is_end() {
        if queue.value_at(position).seconds < 60 {
            let title = *queue.key_at(position);
            position = queue.erase(position);
            println!("dropped {title}");
        } else {
            position = queue.next_position(position);
        }
    }

    // Remember where the long track sits, then trim it from a cursor.
    let long_drive = queue.find("Long Drive");
    let mut cursor = queue.cursor_at_mut(long_drive);
    cursor.value_mut().seconds = 300;
    cursor.move_next();
    println!("after Long Drive comes {:?}", cursor.key());

    print_queue("final", &queue);

    // Play everything from the front.
    let mut total = 0;
    while let Some((title, track)) = queue.pop_front() {
        println!("playing {title}");
        total += track.seconds;
    }
    println!("played {total}s of music");
    assert!(queue.is_empty());
}
