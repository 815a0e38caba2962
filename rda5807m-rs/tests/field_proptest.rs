//! Property tests for register field packing and channel arithmetic.

use proptest::prelude::*;

use rda5807m_rs::rda5807m::CHAN_MAX;
use rda5807m_rs::registers::{
    Field, BAND, CHAN, CLK_MODE, DMUTE, ENABLE, READCHAN, RSSI, SEEK_TH, SPACE, TH_SOFTBLEND,
    TUNE, VOLUME,
};
use rda5807m_rs::settings::{Band, BandPlan, ChannelSpacing};

const FIELDS: [Field; 12] = [
    CHAN,
    TUNE,
    BAND,
    SPACE,
    CLK_MODE,
    DMUTE,
    ENABLE,
    SEEK_TH,
    VOLUME,
    TH_SOFTBLEND,
    READCHAN,
    RSSI,
];

proptest! {
    #[test]
    fn inject_then_extract_truncates_to_width(
        index in 0..FIELDS.len(),
        word in any::<u16>(),
        value in any::<u16>(),
    ) {
        let field = FIELDS[index];
        let updated = field.inject(word, value);

        prop_assert_eq!(field.extract(updated), value & field.max());
        prop_assert_eq!(updated & !field.mask, word & !field.mask);
    }

    #[test]
    fn in_range_values_are_stored_unchanged(
        index in 0..FIELDS.len(),
        word in any::<u16>(),
        raw in any::<u16>(),
    ) {
        let field = FIELDS[index];
        let value = raw % (field.max() + 1);

        prop_assert_eq!(field.extract(field.inject(word, value)), value);
    }

    #[test]
    fn channel_never_exceeds_chan_max(khz in any::<u32>()) {
        let channel = BandPlan::WORLD_WIDE_100K.channel_for(khz, CHAN_MAX);

        prop_assert!(channel <= CHAN_MAX);
    }

    #[test]
    fn grid_frequencies_round_trip(channel in 0..=CHAN_MAX) {
        let plan = BandPlan::WORLD_WIDE_100K;
        let khz = plan.frequency_for(channel);

        prop_assert_eq!(plan.channel_for(khz, CHAN_MAX), channel);
    }

    #[test]
    fn off_grid_frequencies_quantize_down(khz in 76_000u32..178_300) {
        let plan = BandPlan::WORLD_WIDE_100K;
        let tuned = plan.frequency_for(plan.channel_for(khz, CHAN_MAX));

        prop_assert!(tuned <= khz);
        prop_assert!(khz - tuned < 100);
    }

    #[test]
    fn every_plan_clamps_below_band(bits in 0u16..4, spacing in 0u16..4, khz in 0u32..50_000) {
        let plan = BandPlan {
            band: Band::from_bits(bits),
            spacing: ChannelSpacing::from_bits(spacing),
        };

        prop_assert_eq!(plan.channel_for(khz, CHAN_MAX), 0);
    }
}
