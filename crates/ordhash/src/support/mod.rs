// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod alloc;
pub(crate) mod fmt_utils;
pub(crate) mod hash_builder;
pub(crate) mod hash_table;
pub(crate) mod map_id;
pub(crate) mod order_list;
