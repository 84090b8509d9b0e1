use ordhash::{
    OrderedHashMap, Position, errors::PositionError, ordered_hash_map,
};
use ordhash_test_utils::{
    eq_props::{assert_eq_props, assert_ne_props},
    naive_map::NaiveMap,
    test_map::{
        Alloc, HashBuilder, TestMap, assert_matches_naive, test_map,
        test_map_from,
    },
    unwind::catch_panic,
};
use proptest::prelude::*;
use std::{collections::HashMap, fmt::Write};
use test_strategy::{Arbitrary, proptest};

fn abc() -> TestMap<&'static str, u32> {
    test_map_from([("a", 1), ("b", 2), ("c", 3)])
}

fn keys<V>(map: &TestMap<&'static str, V>) -> Vec<&'static str> {
    map.keys().copied().collect()
}

#[test]
fn with_capacity() {
    let map = OrderedHashMap::<u8, u8, HashBuilder>::with_capacity_and_hasher(
        1024,
        HashBuilder::default(),
    );
    assert!(map.capacity() >= 1024);
    assert!(map.is_empty());
}

#[test]
fn reserve_and_shrink() {
    let mut map = abc();
    map.reserve(100);
    assert!(map.capacity() >= 103);

    map.remove("b");
    map.shrink_to_fit();
    assert!(map.capacity() >= map.len());
    assert_eq!(keys(&map), ["a", "c"]);
    map.validate().expect("map is valid");
}

#[test]
fn insert_appends_and_overwrites_in_place() {
    let mut map = test_map::<&str, u32>();
    let a = map.insert("a", 1);
    let b = map.insert("b", 2);
    map.insert("c", 3);

    // Overwriting keeps the position and the place in the order.
    assert_eq!(map.insert("a", 10), a);
    assert_eq!(keys(&map), ["a", "b", "c"]);
    assert_eq!(map.get("a"), Some(&10));

    let (position, old) = map.insert_full("b", 20);
    assert_eq!(position, b);
    assert_eq!(old, Some(2));

    let (position, old) = map.insert_full("d", 4);
    assert_eq!(old, None);
    assert_eq!(map.key_at(position), &"d");
    assert_eq!(map.last_key(), &"d");

    assert_eq!(map.push_back("e", 5), map.find("e"));
    assert_eq!(keys(&map), ["a", "b", "c", "d", "e"]);
    map.validate().expect("map is valid");
}

#[test]
fn push_front_prepends_or_overwrites() {
    let mut map = abc();
    let z = map.push_front("z", 26);
    assert_eq!(map.begin(), z);
    assert_eq!(keys(&map), ["z", "a", "b", "c"]);

    // An existing key stays where it is.
    let c = map.find("c");
    assert_eq!(map.push_front("c", 30), c);
    assert_eq!(keys(&map), ["z", "a", "b", "c"]);
    assert_eq!(map.last(), &30);
    map.validate().expect("map is valid");
}

#[test]
fn remove_and_take() {
    let mut map = abc();
    let before = map.clone();

    // Absent keys leave the map unchanged.
    assert!(!map.remove("x"));
    assert_eq!(map.take("x"), None);
    assert_eq!(map.remove_entry("x"), None);
    assert_eq!(map, before);

    assert!(map.remove("b"));
    assert!(!map.contains_key("b"));
    assert_eq!(keys(&map), ["a", "c"]);

    assert_eq!(map.take("a"), Some(1));
    assert_eq!(map.remove_entry("c"), Some(("c", 3)));
    assert!(map.is_empty());
    map.validate().expect("map is valid");
}

#[test]
fn lookups() {
    let mut map = abc();
    assert!(map.contains_key("a"));
    assert!(!map.contains_key("x"));
    assert_eq!(map.get_key_value("b"), Some((&"b", &2)));

    *map.get_mut("b").unwrap() += 10;
    assert_eq!(map["b"], 12);

    // Missing keys read as the default, without inserting anything.
    assert_eq!(map.value("b"), 12);
    assert_eq!(map.value("x"), 0);
    assert_eq!(map.value_or("x", 99), 99);
    assert_eq!(map.len(), 3);
}

#[test]
#[should_panic(expected = "key not found in OrderedHashMap")]
fn index_panics_on_missing_key() {
    let map = abc();
    let _value: u32 = map["x"];
}

#[test]
fn get_or_insert() {
    let mut map = abc();
    *map.get_or_insert_default("d") += 4;
    *map.get_or_insert_default("a") += 10;
    assert_eq!(map.get_or_insert_with("e", || 5), &5);
    assert_eq!(map.get_or_insert_with("e", || unreachable!()), &5);

    assert_eq!(keys(&map), ["a", "b", "c", "d", "e"]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [11, 2, 3, 4, 5]);
}

#[test]
fn reverse_lookup() {
    let map = test_map_from([("a", 1), ("b", 2), ("c", 1), ("d", 3)]);

    // The first match in order wins.
    assert_eq!(map.key_of(&1), Some(&"a"));
    assert_eq!(map.key_of(&3), Some(&"d"));
    assert_eq!(map.key_of(&7), None);
    assert_eq!(map.key_of_or(&7, &"none"), &"none");
    assert_eq!(map.key_of_or(&2, &"none"), &"b");

    assert_eq!(map.keys_of(&1).copied().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(map.keys_of(&1).rev().copied().collect::<Vec<_>>(), ["c", "a"]);
    assert_eq!(map.keys_of(&7).count(), 0);
}

#[test]
fn keys_round_trip() {
    let pairs = [("q", 1), ("w", 2), ("e", 3), ("r", 4), ("t", 5)];
    let map = test_map_from(pairs);
    let expected: Vec<_> = pairs.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys(&map), expected);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
}

#[test]
fn sequence_ends() {
    let mut map = abc();
    assert_eq!(map.first_key(), &"a");
    assert_eq!(map.last_key(), &"c");
    assert_eq!(map.first(), &1);
    assert_eq!(map.last(), &3);
    assert_eq!(map.front(), Some((&"a", &1)));
    assert_eq!(map.back(), Some((&"c", &3)));

    *map.first_mut() = 100;
    *map.last_mut() = 300;
    assert_eq!(map.get("a"), Some(&100));
    assert_eq!(map.get("c"), Some(&300));

    assert_eq!(map.take_first(), ("a", 100));
    assert_eq!(map.take_last(), ("c", 300));
    assert_eq!(keys(&map), ["b"]);

    map.insert("d", 4);
    map.remove_first();
    assert_eq!(keys(&map), ["d"]);
    map.remove_last();
    assert!(map.is_empty());

    assert_eq!(map.front(), None);
    assert_eq!(map.back(), None);
    assert_eq!(map.pop_front(), None);
    assert_eq!(map.pop_back(), None);
    map.validate().expect("map is valid");
}

#[test]
#[should_panic(expected = "called `first_key` on an empty OrderedHashMap")]
fn first_key_panics_on_empty() {
    test_map::<u8, u8>().first_key();
}

#[test]
#[should_panic(expected = "called `last_key` on an empty OrderedHashMap")]
fn last_key_panics_on_empty() {
    test_map::<u8, u8>().last_key();
}

#[test]
#[should_panic(expected = "called `first` on an empty OrderedHashMap")]
fn first_panics_on_empty() {
    test_map::<u8, u8>().first();
}

#[test]
#[should_panic(expected = "called `last_mut` on an empty OrderedHashMap")]
fn last_mut_panics_on_empty() {
    test_map::<u8, u8>().last_mut();
}

#[test]
#[should_panic(expected = "called `take_first` on an empty OrderedHashMap")]
fn take_first_panics_on_empty() {
    test_map::<u8, u8>().take_first();
}

#[test]
#[should_panic(expected = "called `take_last` on an empty OrderedHashMap")]
fn take_last_panics_on_empty() {
    test_map::<u8, u8>().take_last();
}

#[test]
#[should_panic(expected = "called `remove_first` on an empty OrderedHashMap")]
fn remove_first_panics_on_empty() {
    test_map::<u8, u8>().remove_first();
}

#[test]
#[should_panic(expected = "called `remove_last` on an empty OrderedHashMap")]
fn remove_last_panics_on_empty() {
    test_map::<u8, u8>().remove_last();
}

#[test]
fn position_walk() {
    let map = abc();
    let a = map.begin();
    let b = map.next_position(a);
    let c = map.next_position(b);
    let end = map.next_position(c);

    assert_eq!(map.key_at(a), &"a");
    assert_eq!(map.key_at(b), &"b");
    assert_eq!(map.entry_at(c), (&"c", &3));
    assert_eq!(end, map.end());
    assert!(end.is_end());
    assert!(!a.is_end());

    // Backwards from the end reaches the last entry.
    assert_eq!(map.prev_position(end), c);
    assert_eq!(map.prev_position(b), a);

    assert_eq!(map.advance(a, 2), c);
    assert_eq!(map.advance(a, 3), end);
    assert_eq!(map.advance(end, -3), a);
    assert_eq!(map.advance(b, 0), b);

    assert_eq!(map.find("b"), b);
    assert_eq!(map.find("x"), end);

    let empty = test_map::<u8, u8>();
    assert_eq!(empty.begin(), empty.end());
}

#[test]
fn positions_survive_unrelated_changes() {
    let mut map = abc();
    let a = map.find("a");
    let c = map.find("c");

    map.remove("b");
    map.insert("d", 4);
    map.push_front("z", 0);
    map.insert("a", 10);

    assert!(map.is_valid(a));
    assert!(map.is_valid(c));
    // Values are read at access time, so the overwrite is visible.
    assert_eq!(map.value_at(a), &10);
    assert_eq!(map.next_position(a), c);

    *map.value_at_mut(c) = 30;
    assert_eq!(map.get("c"), Some(&30));
}

#[test]
fn erase_returns_next() {
    let mut map = test_map_from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    let b = map.find("b");
    let c = map.find("c");
    let d = map.find("d");

    assert_eq!(map.erase(b), c);
    assert_eq!(keys(&map), ["a", "c", "d"]);

    // Erasing the last entry returns the end.
    assert_eq!(map.erase(d), map.end());

    // Erasing the end is a no-op.
    let end = map.end();
    assert_eq!(map.erase(end), end);
    assert_eq!(keys(&map), ["a", "c"]);

    // Erase everything in a walk.
    let mut position = map.begin();
    while !position.is_end() {
        position = map.erase(position);
    }
    assert!(map.is_empty());
    map.validate().expect("map is valid");
}

#[test]
fn erased_positions_go_stale() {
    let mut map = abc();
    let a = map.find("a");
    let b = map.find("b");

    map.erase(a);
    assert!(!map.is_valid(a));
    assert_eq!(map.try_entry_at(a), Err(PositionError::Stale));
    assert!(map.is_valid(b));

    // The freed slot is reused, but the old position stays stale.
    let d = map.insert("d", 4);
    assert_ne!(a, d);
    assert!(!map.is_valid(a));
    assert!(catch_panic(|| *map.key_at(a)).is_none());

    // Removing and reinserting a key gives a fresh position.
    map.remove("b");
    let b2 = map.insert("b", 2);
    assert_ne!(b, b2);
    assert!(!map.is_valid(b));
}

#[test]
fn clear_invalidates_positions() {
    let mut map = abc();
    let positions: Vec<Position> = ["a", "b", "c"].map(|k| map.find(k)).into();

    map.clear();
    assert!(map.is_empty());
    map.extend([("a", 1), ("b", 2), ("c", 3)]);

    for position in positions {
        assert!(!map.is_valid(position));
    }
    map.validate().expect("map is valid");
}

#[test]
fn try_entry_at_errors() {
    let map = abc();
    let other = abc();

    assert_eq!(map.try_entry_at(map.begin()), Ok((&"a", &1)));
    assert_eq!(map.try_entry_at(map.end()), Err(PositionError::End));
    assert_eq!(
        map.try_entry_at(other.begin()),
        Err(PositionError::ForeignMap)
    );
    assert_eq!(map.try_entry_at(other.end()), Err(PositionError::ForeignMap));
    assert!(!map.is_valid(map.end()));
}

#[test]
#[should_panic(expected = "cannot move past the end of an OrderedHashMap")]
fn next_position_panics_at_end() {
    let map = abc();
    map.next_position(map.end());
}

#[test]
#[should_panic(expected = "cannot move before the first entry")]
fn prev_position_panics_at_begin() {
    let map = abc();
    map.prev_position(map.begin());
}

#[test]
#[should_panic(expected = "cannot move before the first entry")]
fn prev_position_panics_on_empty() {
    let map = test_map::<u8, u8>();
    map.prev_position(map.end());
}

#[test]
#[should_panic(expected = "cannot move past the end of an OrderedHashMap")]
fn advance_panics_past_end() {
    let map = abc();
    map.advance(map.begin(), 4);
}

#[test]
#[should_panic(expected = "position is the end of the map")]
fn key_at_panics_at_end() {
    let map = abc();
    map.key_at(map.end());
}

#[test]
#[should_panic(expected = "position refers to an entry that was removed")]
fn value_at_panics_on_stale() {
    let mut map = abc();
    let a = map.find("a");
    map.remove("a");
    map.value_at(a);
}

#[test]
#[should_panic(expected = "position belongs to a different map")]
fn erase_panics_on_foreign() {
    let mut map = abc();
    let other = abc();
    map.erase(other.begin());
}

#[test]
#[should_panic(expected = "position refers to an entry that was removed")]
fn erase_panics_on_stale() {
    let mut map = abc();
    let a = map.find("a");
    map.erase(a);
    map.erase(a);
}

#[test]
fn position_equality() {
    let mut map = abc();
    let other = abc();

    assert_eq!(map.find("a"), map.begin());
    assert_eq!(map.end(), map.end());
    assert_ne!(map.find("a"), map.find("b"));
    // Same slot, different map.
    assert_ne!(map.begin(), other.begin());
    assert_ne!(map.end(), other.end());

    let a = map.find("a");
    assert_eq!(map.insert("a", 5), a);
}

#[test]
fn position_debug() {
    let map = abc();
    let end = format!("{:?}", map.end());
    assert!(end.starts_with("Position { map: #"), "{end}");
    assert!(end.ends_with(", slot: end }"), "{end}");

    let begin = format!("{:?}", map.begin());
    assert!(begin.ends_with(", slot: 0, generation: 0 }"), "{begin}");
}

#[test]
fn clone_is_deep_and_has_its_own_positions() {
    let mut map = abc();
    let a = map.find("a");
    let copy = map.clone();

    assert_eq_props(&map, &copy);
    copy.validate().expect("copy is valid");

    // Source positions are rejected by the copy.
    assert!(!copy.is_valid(a));
    assert_eq!(copy.try_entry_at(a), Err(PositionError::ForeignMap));
    assert_ne!(copy.find("a"), a);
    assert_eq!(copy.key_at(copy.find("a")), &"a");

    // Mutating the source leaves the copy alone.
    map.insert("a", 100);
    map.remove("b");
    map.insert("d", 4);
    assert_eq!(copy.get("a"), Some(&1));
    assert_eq!(keys(&copy), ["a", "b", "c"]);
    assert_ne_props(&map, &copy);

    // And the copy's positions are rejected by the source.
    assert!(!map.is_valid(copy.begin()));
}

#[test]
fn swap_moves_positions_with_data() {
    let mut map1 = abc();
    let mut map2 = test_map_from([("x", 10)]);
    let a = map1.find("a");
    let x = map2.find("x");

    std::mem::swap(&mut map1, &mut map2);
    assert_eq!(map1.key_at(x), &"x");
    assert_eq!(map2.key_at(a), &"a");
}

#[test]
fn order_sensitive_equality() {
    let map1 = abc();
    let map2 = test_map_from([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq_props(&map1, &map2);

    // Same pairs, different order.
    let map3 = test_map_from([("c", 3), ("b", 2), ("a", 1)]);
    assert_ne_props(&map1, &map3);

    // Same keys, different value.
    let map4 = test_map_from([("a", 1), ("b", 20), ("c", 3)]);
    assert_ne_props(&map1, &map4);

    // A prefix is not equal.
    let map5 = test_map_from([("a", 1), ("b", 2)]);
    assert_ne_props(&map1, &map5);

    // Two empty maps are equal.
    assert_eq_props(test_map::<u8, u8>(), test_map::<u8, u8>());

    // Overwriting doesn't reorder, so equality is restored.
    let mut map6 = map4.clone();
    map6.insert("b", 2);
    assert_eq_props(&map1, &map6);
}

#[test]
fn cursor_walk() {
    let map = abc();
    let mut cursor = map.cursor_front();
    assert_eq!(cursor.current(), Some((&"a", &1)));
    cursor.move_next();
    assert_eq!(cursor.key(), &"b");
    assert_eq!(cursor.value(), &2);
    assert_eq!(cursor.position(), map.find("b"));

    // Cursors are Copy; the copy moves independently.
    let saved = cursor;
    cursor.advance(2);
    assert!(cursor.is_end());
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.position(), map.end());
    assert_eq!(saved.key(), &"b");

    cursor.move_prev();
    assert_eq!(cursor, map.cursor_back());
    cursor.advance(-2);
    assert_eq!(cursor, map.cursor_front());

    assert_eq!(map.cursor("c"), map.cursor_back());
    assert!(map.cursor("x").is_end());
    assert_eq!(map.cursor_at(map.find("b")), saved);
    assert!(map.cursor_at(map.end()).is_end());

    // Equal positions in different maps are different cursors.
    let other = abc();
    assert_ne!(map.cursor_front(), other.cursor_front());
}

#[test]
#[should_panic(expected = "cannot move past the end of an OrderedHashMap")]
fn cursor_move_next_panics_at_end() {
    let map = test_map_from([(1u8, 1u8)]);
    let mut cursor = map.cursor_back();
    cursor.move_next();
    cursor.move_next();
}

#[test]
#[should_panic(expected = "Cursor::key called at the end of the map")]
fn cursor_key_panics_at_end() {
    let map = test_map::<u8, u8>();
    map.cursor_front().key();
}

#[test]
#[should_panic(expected = "position belongs to a different map")]
fn cursor_at_panics_on_foreign() {
    let map = abc();
    let other = abc();
    map.cursor_at(other.begin());
}

#[test]
fn cursor_mut_edits() {
    let mut map = test_map_from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);

    let mut cursor = map.cursor_mut("b");
    assert_eq!(cursor.insert_value(20), 2);
    *cursor.value_mut() += 1;
    assert_eq!(cursor.value(), &21);

    // Removing moves to the next entry.
    assert_eq!(cursor.remove_current(), Some(("b", 21)));
    assert_eq!(cursor.key(), &"c");
    cursor.move_prev();
    assert_eq!(cursor.key(), &"a");
    assert_eq!(cursor.as_cursor().value(), &1);

    let mut cursor = map.cursor_back_mut();
    assert_eq!(cursor.remove_current(), Some(("d", 4)));
    assert!(cursor.is_end());
    assert_eq!(cursor.remove_current(), None);
    assert_eq!(cursor.current(), None);
    cursor.move_prev();
    assert_eq!(cursor.current_mut(), Some((&"c", &mut 3)));

    assert_eq!(keys(&map), ["a", "c"]);
    map.validate().expect("map is valid");

    let c = map.find("c");
    let mut cursor = map.cursor_at_mut(c);
    cursor.move_prev();
    let position = cursor.position();
    assert_eq!(position, map.begin());

    let mut cursor = map.cursor_front_mut();
    while cursor.remove_current().is_some() {}
    assert!(map.is_empty());
}

#[test]
fn entry_api() {
    let mut map = abc();
    let b = map.find("b");

    match map.entry("b") {
        ordered_hash_map::Entry::Occupied(mut entry) => {
            assert_eq!(entry.key(), &"b");
            assert_eq!(entry.get(), &2);
            assert_eq!(entry.insert(20), 2);
            *entry.get_mut() += 1;
            assert_eq!(entry.position(), b);
        }
        ordered_hash_map::Entry::Vacant(_) => panic!("expected occupied"),
    }
    assert_eq!(map.get("b"), Some(&21));

    let ordered_hash_map::Entry::Vacant(entry) = map.entry("d") else {
        panic!("expected vacant");
    };
    assert_eq!(entry.key(), &"d");
    let entry = entry.insert_entry(4);
    assert_eq!(entry.get(), &4);
    assert_eq!(keys(&map), ["a", "b", "c", "d"]);

    *map.entry("a").or_insert(0) += 10;
    *map.entry("e").or_insert(5) += 10;
    map.entry("f").or_insert_with_key(|k| k.len() as u32);
    map.entry("g").or_default();
    map.entry("a").and_modify(|v| *v *= 2).or_insert(0);
    map.entry("h").and_modify(|v| *v *= 2).or_insert(8);
    assert_eq!(
        map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        [
            ("a", 22),
            ("b", 21),
            ("c", 3),
            ("d", 4),
            ("e", 15),
            ("f", 1),
            ("g", 0),
            ("h", 8)
        ]
    );

    let ordered_hash_map::Entry::Occupied(entry) = map.entry("c") else {
        panic!("expected occupied");
    };
    assert_eq!(entry.remove(), 3);
    let ordered_hash_map::Entry::Occupied(entry) = map.entry("d") else {
        panic!("expected occupied");
    };
    assert_eq!(entry.remove_entry(), ("d", 4));
    assert_eq!(map.entry("x").key(), &"x");
    assert_eq!(keys(&map), ["a", "b", "e", "f", "g", "h"]);
    map.validate().expect("map is valid");

    let ordered_hash_map::Entry::Vacant(entry) = map.entry("y") else {
        panic!("expected vacant");
    };
    assert_eq!(entry.into_key(), "y");
    let ordered_hash_map::Entry::Occupied(entry) = map.entry("h") else {
        panic!("expected occupied");
    };
    assert_eq!(*entry.into_mut(), 8);
    assert!(!map.contains_key("y"));
}

#[test]
fn retain_keeps_order() {
    let mut map = test_map_from((0u8..10).map(|i| (i, u32::from(i) * 10)));
    let five = map.find(&5);
    map.retain(|k, v| {
        *v += 1;
        k % 2 == 1
    });
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 7, 9]);
    assert_eq!(map.get(&5), Some(&51));
    assert!(map.is_valid(five));
    map.validate().expect("map is valid");
}

#[test]
fn drain() {
    let mut map = abc();
    let drained: Vec<_> = map.drain().collect();
    assert_eq!(drained, [("a", 1), ("b", 2), ("c", 3)]);
    assert!(map.is_empty());

    // Dropping a partially consumed drain removes the rest.
    let mut map = abc();
    let mut drain = map.drain();
    assert_eq!(drain.len(), 3);
    assert_eq!(drain.next_back(), Some(("c", 3)));
    drop(drain);
    assert!(map.is_empty());
    map.validate().expect("map is valid");
}

#[test]
fn iterators() {
    let mut map = abc();

    assert_eq!(map.iter().len(), 3);
    assert_eq!(
        map.iter().rev().collect::<Vec<_>>(),
        [(&"c", &3), (&"b", &2), (&"a", &1)]
    );
    assert_eq!(map.keys().rev().copied().collect::<Vec<_>>(), ["c", "b", "a"]);
    assert_eq!(map.values().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);

    // Both ends meet in the middle without yielding an entry twice.
    let mut iter = map.iter();
    assert_eq!(iter.next(), Some((&"a", &1)));
    assert_eq!(iter.next_back(), Some((&"c", &3)));
    assert_eq!(iter.next(), Some((&"b", &2)));
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);

    for (_, v) in map.iter_mut() {
        *v *= 10;
    }
    for v in map.values_mut().rev() {
        *v += 1;
    }
    for (k, v) in &mut map {
        if *k == "b" {
            *v = 0;
        }
    }
    assert_eq!((&map).into_iter().count(), 3);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [11, 0, 31]);

    assert_eq!(
        map.clone().into_iter().rev().collect::<Vec<_>>(),
        [("c", 31), ("b", 0), ("a", 11)]
    );
    assert_eq!(map.clone().into_keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(map.into_values().rev().collect::<Vec<_>>(), [31, 0, 11]);
}

#[test]
fn extend_keeps_first_position_and_last_value() {
    let mut map = test_map::<&str, u32>();
    map.extend([("b", 1), ("a", 2), ("b", 3)]);
    assert_eq!(
        map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        [("b", 3), ("a", 2)]
    );

    let more = [("c", 4), ("a", 5)];
    map.extend(more.iter().map(|(k, v)| (k, v)));
    assert_eq!(
        map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        [("b", 3), ("a", 5), ("c", 4)]
    );

    let collected: TestMap<&str, u32> =
        [("x", 1), ("y", 2), ("x", 3)].into_iter().collect();
    assert_eq!(keys(&collected), ["x", "y"]);
    assert_eq!(collected.get("x"), Some(&3));
}

#[test]
fn macro_builds_in_order() {
    let map = ordered_hash_map! {
        hasher = HashBuilder;
        "b" => 2,
        "a" => 1,
        "b" => 20,
    };
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(map.get("b"), Some(&20));

    let empty: OrderedHashMap<u8, u8, HashBuilder> =
        ordered_hash_map! { hasher = HashBuilder; };
    assert!(empty.is_empty());
}

#[cfg(feature = "default-hasher")]
#[test]
fn default_hasher_constructors() {
    let map = ordered_hash_map! { 1 => "one", 2 => "two" };
    assert_eq!(map, OrderedHashMap::from([(1, "one"), (2, "two")]));

    let mut map = OrderedHashMap::with_capacity(8);
    map.insert(1, 1);
    assert!(map.capacity() >= 8);

    let mut map = OrderedHashMap::new_in(Alloc::default());
    map.insert("k", "v");
    assert_eq!(map.get("k"), Some(&"v"));
    let map =
        OrderedHashMap::<u8, u8, _, _>::with_capacity_in(4, Alloc::default());
    assert!(map.capacity() >= 4);
}

#[test]
fn unordered_conversions() {
    let map = abc();
    let hash_map = map.to_hash_map();
    assert_eq!(hash_map.len(), 3);
    assert_eq!(hash_map.get("b"), Some(&2));

    let hash_map = map.clone().into_hash_map();
    assert_eq!(hash_map.get("c"), Some(&3));

    #[cfg(feature = "std")]
    {
        let std_map: std::collections::HashMap<_, _, HashBuilder> = map.into();
        assert_eq!(std_map.get("a"), Some(&1));
    }
}

#[test]
fn debug_impls() {
    let mut map = abc();
    let mut out = String::new();

    writeln!(out, "map: {map:#?}").unwrap();
    writeln!(out, "iter: {:?}", map.iter()).unwrap();
    writeln!(out, "keys: {:?}", map.keys()).unwrap();
    writeln!(out, "values: {:?}", map.values()).unwrap();
    writeln!(out, "occupied: {:?}", map.entry("b")).unwrap();
    writeln!(out, "vacant: {:?}", map.entry("d")).unwrap();

    expectorate::assert_contents("tests/output/debug_impls.txt", &out);
}

#[derive(Debug, Arbitrary)]
enum Operation {
    // Make inserts a bit more common to try and fill up the map.
    #[weight(6)]
    Insert(u8, u32),
    #[weight(2)]
    PushFront(u8, u32),
    #[weight(2)]
    Remove(u8),
    Take(u8),
    Get(u8),
    PopFront,
    PopBack,
    EraseAt(usize),
    RetainBelow(u8),
    Clear,
    CloneAndCompare,
}

#[proptest(cases = 16)]
fn proptest_ops(
    #[strategy(prop::collection::vec(any::<Operation>(), 0..1024))] ops: Vec<
        Operation,
    >,
) {
    let mut map = test_map::<u8, u32>();
    let mut naive_map = NaiveMap::new();

    // Positions of the live keys, and positions of keys since removed.
    let mut live = HashMap::<u8, Position>::new();
    let mut retired = Vec::<Position>::new();

    for op in ops {
        match op {
            Operation::Insert(key, value) => {
                let (position, map_old) = map.insert_full(key, value);
                let naive_old = naive_map.insert(key, value);
                assert_eq!(map_old, naive_old);
                assert_eq!(map.key_at(position), &key);
                if let Some(&existing) = live.get(&key) {
                    assert_eq!(position, existing, "overwrite keeps position");
                }
                live.insert(key, position);
            }
            Operation::PushFront(key, value) => {
                let position = map.push_front(key, value);
                naive_map.push_front(key, value);
                if let Some(&existing) = live.get(&key) {
                    assert_eq!(position, existing, "overwrite keeps position");
                }
                live.insert(key, position);
            }
            Operation::Remove(key) => {
                assert_eq!(map.remove_entry(&key), naive_map.remove(&key));
            }
            Operation::Take(key) => {
                assert_eq!(
                    map.take(&key),
                    naive_map.remove(&key).map(|(_, v)| v)
                );
            }
            Operation::Get(key) => {
                assert_eq!(map.get(&key), naive_map.get(&key));
                assert_eq!(
                    map.contains_key(&key),
                    naive_map.get(&key).is_some()
                );
            }
            Operation::PopFront => {
                assert_eq!(map.pop_front(), naive_map.pop_front());
            }
            Operation::PopBack => {
                assert_eq!(map.pop_back(), naive_map.pop_back());
            }
            Operation::EraseAt(index) => {
                if naive_map.is_empty() {
                    let end = map.end();
                    assert_eq!(map.erase(end), end);
                } else {
                    let index = index % naive_map.len();
                    let position = map.advance(map.begin(), index as isize);
                    let next = map.erase(position);
                    naive_map.remove_at(index);
                    match naive_map.get_index(index) {
                        Some((key, _)) => assert_eq!(map.key_at(next), key),
                        None => assert_eq!(next, map.end()),
                    }
                }
            }
            Operation::RetainBelow(bound) => {
                map.retain(|k, _| *k < bound);
                naive_map.retain(|k, _| *k < bound);
            }
            Operation::Clear => {
                map.clear();
                naive_map.clear();
            }
            Operation::CloneAndCompare => {
                let copy = map.clone();
                copy.validate().expect("copy is valid");
                assert_eq_props(&map, &copy);
                if let Some(&position) = live.values().next() {
                    assert!(!copy.is_valid(position));
                }
            }
        }

        // Retire positions of keys that are no longer present.
        live.retain(|key, position| {
            let present = naive_map.get(key).is_some();
            if !present {
                retired.push(*position);
            }
            present
        });

        assert_matches_naive(&map, &naive_map);
        for (key, &position) in &live {
            assert_eq!(map.key_at(position), key, "live position still valid");
        }
        for &position in &retired {
            assert!(!map.is_valid(position), "removed position is stale");
        }
    }
}

fn permutation_strategy(
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = (Vec<(u8, u32)>, Vec<(u8, u32)>)> {
    prop::collection::btree_map(any::<u8>(), any::<u32>(), size).prop_flat_map(
        |pairs| {
            let pairs: Vec<_> = pairs.into_iter().collect();
            (Just(pairs.clone()), Just(pairs).prop_shuffle())
        },
    )
}

#[proptest(cases = 64)]
fn proptest_permutation_eq(
    #[strategy(permutation_strategy(0..64))] pairs: (
        Vec<(u8, u32)>,
        Vec<(u8, u32)>,
    ),
) {
    let (pairs1, pairs2) = pairs;
    let same_order = pairs1 == pairs2;
    let map1 = test_map_from(pairs1);
    let map2 = test_map_from(pairs2);

    // The same set of pairs is equal exactly when the order matches.
    if same_order {
        assert_eq_props(&map1, &map2);
    } else {
        assert_ne_props(&map1, &map2);
    }
    assert_eq!(map1.to_hash_map(), map2.to_hash_map());
}

#[cfg(feature = "proptest")]
#[proptest(cases = 64)]
fn proptest_arbitrary_maps_are_valid(
    map: OrderedHashMap<u8, u8, HashBuilder, Alloc>,
) {
    map.validate().expect("map is valid");
    assert!(map.len() <= 100);
    assert_eq!(map.iter().count(), map.len());
}
