use ordhash::OrderedHashMap;

pub struct Record {
    pub index: u32,
    pub data: String,
}

impl Record {
    pub fn new(index: u32) -> Self {
        Record { index, data: format!("data{index}") }
    }
}

/// Builds a map of `size` records keyed by their index, in ascending order.
pub fn filled_map(size: usize) -> OrderedHashMap<u32, Record> {
    let mut map = OrderedHashMap::with_capacity(size);
    for i in 0..size as u32 {
        map.insert(i, Record::new(i));
    }
    map
}
