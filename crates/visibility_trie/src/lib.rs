extern crate log;
extern crate utility;

use utility::*;

pub_mod_and_use!(
    offset_key,
    ray_trie,
    position_index,
    dense_trie,
    sparse_trie,
    visibility_index,
    naive
);
