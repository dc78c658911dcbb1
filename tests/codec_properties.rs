//! Property-based checks for the GID and tile data codecs

mod common;

use common::ALL_ENCODINGS;
use proptest::prelude::*;
use tmxtile::io::gid::{self, GID_MASK};
use tmxtile::io::tile_data;
use tmxtile::{Compression, EncodingContext};

fn any_gids() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 0..200)
}

proptest! {
    #[test]
    fn gid_flags_split_and_rejoin(raw in any::<u32>()) {
        let parts = gid::decompose(raw);
        prop_assert_eq!(parts.base_id, raw & GID_MASK);
        prop_assert_eq!(
            gid::compose(parts.base_id, parts.horizontal(), parts.vertical(), parts.diagonal()),
            raw
        );
    }

    #[test]
    fn tile_data_decodes_what_it_encodes(gids in any_gids(), width in 0u32..40) {
        for context in ALL_ENCODINGS {
            let payload = tile_data::encode(context, width, &gids).unwrap();
            prop_assert_eq!(payload.context(), context);
            prop_assert_eq!(tile_data::decode(context, &payload).unwrap(), gids.clone());
        }
    }

    #[test]
    fn csv_breaks_once_per_full_row(gids in any_gids(), width in 1u32..40) {
        let text = tile_data::encode_csv(width, &gids);
        let breaks = text.matches('\n').count();
        prop_assert_eq!(breaks, gids.len() / width as usize);
        prop_assert_eq!(tile_data::decode_csv(&text).unwrap(), gids);
    }

    #[test]
    fn zlib_is_decode_only(gids in any_gids()) {
        let context = EncodingContext::base64(Compression::Zlib);
        prop_assert!(tile_data::encode(context, 0, &gids).is_err());
    }
}
