use proptest::prelude::*;

use cohort_types::{Address, CohortId, CohortSet, Digest, Timestamp, MAX_COHORTS};

proptest! {
    /// Address text form parses back to the same address.
    #[test]
    fn address_display_parse_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        prop_assert_eq!(Address::parse(&addr.to_string()).unwrap(), addr);
    }

    /// Upper-casing the hex digits does not change the parsed address.
    #[test]
    fn address_parse_is_case_insensitive(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let upper = format!("0x{}", addr.to_string()[2..].to_uppercase());
        prop_assert_eq!(Address::parse(&upper).unwrap(), addr);
    }

    /// Address::is_zero is true only for all-zero bytes.
    #[test]
    fn address_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        prop_assert_eq!(Address::new(bytes).is_zero(), bytes == [0u8; 20]);
    }

    /// Digest ordering matches byte-array ordering.
    #[test]
    fn digest_ordering_matches_bytes(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
    ) {
        prop_assert_eq!(Digest::new(a).cmp(&Digest::new(b)), a.cmp(&b));
    }

    /// Only ids below MAX_COHORTS map to a registry slot.
    #[test]
    fn cohort_slot_in_range(raw in 0u32..1_000) {
        prop_assert_eq!(CohortId(raw).slot().is_some(), (raw as usize) < MAX_COHORTS);
    }

    /// CohortSet length equals the number of distinct in-range ids inserted.
    #[test]
    fn cohort_set_len_counts_distinct(ids in prop::collection::vec(0u32..8, 0..20)) {
        let set: CohortSet = ids.iter().copied().map(CohortId).collect();
        let mut distinct: Vec<u32> = ids.into_iter().filter(|i| (*i as usize) < MAX_COHORTS).collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(set.len(), distinct.len());
        for id in distinct {
            prop_assert!(set.contains(CohortId(id)));
        }
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// plus_secs never wraps.
    #[test]
    fn timestamp_plus_secs_saturates(base in 0u64..u64::MAX, secs in 0u64..u64::MAX) {
        let t = Timestamp::new(base).plus_secs(secs);
        prop_assert_eq!(t.as_secs(), base.saturating_add(secs));
        prop_assert!(t >= Timestamp::new(base));
    }

    /// Digest and address parsers accept the same prefixes.
    #[test]
    fn digest_and_address_prefixes_agree(
        addr in prop::array::uniform20(0u8..),
        digest in prop::array::uniform32(0u8..),
        prefix in prop::sample::select(vec!["", "0x", "0X"]),
    ) {
        let a = format!("{prefix}{}", hex::encode(addr));
        let d = format!("{prefix}{}", hex::encode(digest));
        prop_assert_eq!(Address::parse(&a).unwrap(), Address::new(addr));
        prop_assert_eq!(Digest::from_hex(&d).unwrap(), Digest::new(digest));
    }
}
