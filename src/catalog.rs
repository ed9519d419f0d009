//! The fixed table of known X-ray source profiles and the lookup that
//! resolves a reported identity string against it.

/// One known physical X-ray source model and its operating envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProfile {
    /// Substring expected somewhere in the device's reported identity
    /// string. Acts as the lookup key; not unique by construction.
    pub serial_identifier: &'static str,
    /// Display/processing parameter for downstream imaging.
    pub horizontal_crop_percent: u8,
    /// Inclusive kilovoltage operating range.
    pub kv_min: u16,
    pub kv_max: u16,
    /// Inclusive microamperage operating range.
    pub ua_min: u16,
    pub ua_max: u16,
    /// Canonical model/settings-file name for this profile.
    pub settings_model: &'static str,
}

/// An immutable, ordered set of source profiles.
///
/// Matching is substring containment evaluated in declaration order with
/// first-match-wins semantics. Overlapping identifiers make later entries
/// unreachable for crafted inputs; this is a known, accepted sharp edge of
/// the scheme, not something to reorder silently.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    profiles: &'a [SourceProfile],
}

impl<'a> Catalog<'a> {
    pub const fn new(profiles: &'a [SourceProfile]) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &'a [SourceProfile] {
        self.profiles
    }

    /// Resolves an identity string to the first profile whose
    /// `serial_identifier` appears anywhere within it.
    ///
    /// An empty identity never matches, even against an empty identifier.
    pub fn lookup(&self, identity: &str) -> Option<&'a SourceProfile> {
        if identity.is_empty() {
            return None;
        }
        self.profiles
            .iter()
            .find(|profile| identity.contains(profile.serial_identifier))
    }
}

// The known sources, in matching order.
pub const XRAY_SOURCES: &[SourceProfile] = &[
    // 120 kV VJX
    SourceProfile {
        serial_identifier: "673",
        horizontal_crop_percent: 90,
        kv_min: 40,
        kv_max: 120,
        ua_min: 50,
        ua_max: 300,
        settings_model: "IXS120BP036P112",
    },
    SourceProfile {
        serial_identifier: "649",
        horizontal_crop_percent: 85,
        kv_min: 40,
        kv_max: 120,
        ua_min: 50,
        ua_max: 300,
        settings_model: "IXS120BP036P112",
    },
    SourceProfile {
        serial_identifier: "112",
        horizontal_crop_percent: 85,
        kv_min: 40,
        kv_max: 120,
        ua_min: 50,
        ua_max: 300,
        settings_model: "IXS120BP036P112",
    },
    // 120 kV P673 with Luxbright tube
    SourceProfile {
        serial_identifier: "796",
        horizontal_crop_percent: 90,
        kv_min: 40,
        kv_max: 120,
        ua_min: 50,
        ua_max: 300,
        settings_model: "IXS120BP036P112",
    },
    // 120 kV VJX DC P755
    SourceProfile {
        serial_identifier: "755",
        horizontal_crop_percent: 90,
        kv_min: 80,
        kv_max: 120,
        ua_min: 200,
        ua_max: 800,
        settings_model: "IXS120BP096P755",
    },
    // 160 kV VJX DC P747
    SourceProfile {
        serial_identifier: "747",
        horizontal_crop_percent: 90,
        kv_min: 80,
        kv_max: 160,
        ua_min: 200,
        ua_max: 625,
        settings_model: "IXS160BP100P747",
    },
    // 190 kV VJX
    SourceProfile {
        serial_identifier: "401",
        horizontal_crop_percent: 90,
        kv_min: 100,
        kv_max: 190,
        ua_min: 200,
        ua_max: 500,
        settings_model: "IXS200BP150P401",
    },
    SourceProfile {
        serial_identifier: "643",
        horizontal_crop_percent: 90,
        kv_min: 100,
        kv_max: 190,
        ua_min: 200,
        ua_max: 500,
        settings_model: "IXS200BP150P401",
    },
    // 320 kV VJX
    SourceProfile {
        serial_identifier: "662",
        horizontal_crop_percent: 90,
        kv_min: 160,
        kv_max: 320,
        ua_min: 500,
        ua_max: 2500,
        settings_model: "IXS320BP800P662",
    },
];

/// The catalog shipped with the station.
pub const fn default_catalog() -> Catalog<'static> {
    Catalog::new(XRAY_SOURCES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_has_valid_ranges() {
        for profile in default_catalog().profiles() {
            assert!(
                profile.kv_min <= profile.kv_max,
                "kV range inverted for {}",
                profile.serial_identifier
            );
            assert!(
                profile.ua_min <= profile.ua_max,
                "uA range inverted for {}",
                profile.serial_identifier
            );
        }
    }

    #[test]
    fn empty_identity_never_matches() {
        assert!(default_catalog().lookup("").is_none());

        // Even an empty identifier (which every string contains) must not
        // match an empty identity.
        const PROMISCUOUS: &[SourceProfile] = &[SourceProfile {
            serial_identifier: "",
            horizontal_crop_percent: 100,
            kv_min: 40,
            kv_max: 130,
            ua_min: 0,
            ua_max: 300,
            settings_model: "L9181-02",
        }];
        assert!(Catalog::new(PROMISCUOUS).lookup("").is_none());
    }

    #[test]
    fn unknown_identity_matches_nothing() {
        assert!(default_catalog().lookup("UNKNOWN99").is_none());
    }

    #[test]
    fn identifier_matches_as_substring() {
        let profile = default_catalog().lookup("SN673-REV2").unwrap();
        assert_eq!(profile.settings_model, "IXS120BP036P112");
        assert_eq!((profile.kv_min, profile.kv_max), (40, 120));
        assert_eq!((profile.ua_min, profile.ua_max), (50, 300));
    }

    #[test]
    fn first_declared_profile_wins_on_ambiguous_identity() {
        // Both "673" and "649" appear in the identity; "673" is declared
        // first and must win regardless of position within the string.
        let catalog = default_catalog();
        let ambiguous = catalog.lookup("SN649-673").unwrap();
        assert_eq!(ambiguous.serial_identifier, "673");

        // Flipping the declaration order flips the winner.
        let mut reversed: Vec<SourceProfile> = catalog.profiles().to_vec();
        reversed.reverse();
        let flipped = Catalog::new(&reversed).lookup("SN649-673").unwrap();
        assert_eq!(flipped.serial_identifier, "649");
    }

    #[test]
    fn each_distinct_model_is_reachable() {
        let catalog = default_catalog();
        for (identity, model) in [
            ("SN755", "IXS120BP096P755"),
            ("SN747", "IXS160BP100P747"),
            ("SN401", "IXS200BP150P401"),
            ("SN662", "IXS320BP800P662"),
        ] {
            assert_eq!(catalog.lookup(identity).unwrap().settings_model, model);
        }
    }
}
