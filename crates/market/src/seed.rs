//! Demo data seeding and data migrations.
//!
//! Run once at startup, in order:
//!
//! 1. [`seed_if_empty`] - creates the demo artist and the demo catalogue when
//!    there are no stored listing records at all.
//! 2. [`migrate_to_v2`] - replaces the legacy demo catalogue and stamps the
//!    data version as `"2"`.
//! 3. [`normalize_listing_regions`] - fills in a region for every listing
//!    that lacks one.
//!
//! Each step only writes when it changes something, so running [`run`] on
//! up-to-date data performs no store writes at all.

use chrono::Utc;
use tracing::{info, instrument};

use craftify_core::{Email, ListingId, Price, Role, UserId};

use crate::db::{Db, UserRepository};
use crate::models::listing::UNKNOWN_REGION;
use crate::models::{Listing, Profile, User};

/// Current data version.
pub const DATA_VERSION: &str = "2";

/// Demo artist credentials.
pub const DEMO_ARTIST_EMAIL: &str = "artist@craftify.demo";
/// Demo artist password.
pub const DEMO_ARTIST_PASSWORD: &str = "craftify";

/// Titles of the catalogue shipped before version 2.
const LEGACY_TITLES: [&str; 4] = [
    "Walnut Serving Board",
    "Stoneware Mug",
    "Leather Journal",
    "Terracotta Planter",
];

const MEDIA_BASE: &str = "https://www.rudhigat.com/pub/media/wysiwyg";

/// A demo catalogue entry.
struct Sample {
    title: &'static str,
    price: u64,
    img: &'static str,
    desc: &'static str,
}

const SAMPLES: [Sample; 4] = [
    Sample {
        title: "Madhubani Paintings",
        price: 3500,
        img: "download-19.jpg",
        desc: "Traditional Mithila folk art with intricate motifs.",
    },
    Sample {
        title: "Jaipur Blue Pottery",
        price: 1800,
        img: "3_1.png",
        desc: "Iconic blue pottery from Jaipur artisans.",
    },
    Sample {
        title: "Wood Carving",
        price: 4200,
        img: "3.jpg",
        desc: "Hand-carved wooden decor with rich detailing.",
    },
    Sample {
        title: "Terracotta Pottery",
        price: 1600,
        img: "img2-top-gicor1.jpg",
        desc: "Earthy terracotta pottery fired with care.",
    },
];

/// Keyword table for region inference, checked in order.
///
/// A rule matches when the lower-cased `title desc` text contains `key` and,
/// if set, `also`.
struct RegionRule {
    key: &'static str,
    also: Option<&'static str>,
    region: &'static str,
}

const REGION_RULES: [RegionRule; 4] = [
    RegionRule {
        key: "madhubani",
        also: None,
        region: "Bihar",
    },
    RegionRule {
        key: "blue pottery",
        also: None,
        region: "Jaipur",
    },
    RegionRule {
        key: "wood",
        also: Some("carving"),
        region: "Uttar Pradesh",
    },
    RegionRule {
        key: "terracotta",
        also: None,
        region: "West Bengal",
    },
];

/// What a startup pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// The demo artist and catalogue were created.
    pub seeded: bool,
    /// The legacy catalogue was replaced.
    pub migrated: bool,
    /// The version marker was written.
    pub version_stamped: bool,
    /// Number of listings that received an inferred region.
    pub regions_normalized: usize,
}

impl SeedReport {
    /// Whether the pass changed anything.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.seeded || self.migrated || self.version_stamped || self.regions_normalized > 0
    }
}

/// Run every startup step in order.
#[instrument(skip(db))]
pub fn run(db: &Db) -> SeedReport {
    let seeded = seed_if_empty(db);
    let (migrated, version_stamped) = migrate_to_v2(db);
    let regions_normalized = normalize_listing_regions(db);

    let report = SeedReport {
        seeded,
        migrated,
        version_stamped,
        regions_normalized,
    };
    if report.changed() {
        info!(?report, "Startup data pass complete");
    }
    report
}

/// Create the demo artist and catalogue if there are no listings.
///
/// Records that fail to parse still count as listings. An existing demo
/// artist account is reused. Returns whether anything was written.
pub fn seed_if_empty(db: &Db) -> bool {
    if db.stored_listing_count() > 0 {
        return false;
    }

    let artist_id = if let Some(existing) = demo_artist_id(db) {
        existing
    } else {
        let Some(artist) = demo_artist() else {
            return false;
        };
        let id = artist.id.clone();
        let mut users = db.users();
        users.push(artist);
        db.set_users(&users);
        id
    };
    db.set_listings(&demo_listings(&artist_id));

    info!(artist_id = %artist_id, listings = SAMPLES.len(), "Seeded demo catalogue");
    true
}

/// Upgrade stored data to version 2.
///
/// When the stored listings contain a legacy demo title, or there are none,
/// they are replaced with the current demo catalogue owned by the demo artist
/// (or a fresh ID if the artist account is gone). The version marker is then
/// written. Returns `(replaced, stamped)`.
pub fn migrate_to_v2(db: &Db) -> (bool, bool) {
    if db.version() == DATA_VERSION {
        return (false, false);
    }

    let listings = db.listings();
    let has_legacy = listings
        .iter()
        .any(|l| LEGACY_TITLES.contains(&l.title.as_str()));

    let replaced = has_legacy || db.stored_listing_count() == 0;
    if replaced {
        let artist_id = demo_artist_id(db).unwrap_or_else(UserId::generate);
        db.set_listings(&demo_listings(&artist_id));
        info!(artist_id = %artist_id, legacy = has_legacy, "Replaced demo catalogue");
    }

    db.set_version(DATA_VERSION);
    info!(version = DATA_VERSION, "Data version updated");
    (replaced, true)
}

/// Assign a region to every listing without a non-blank one.
///
/// Returns how many listings were updated.
pub fn normalize_listing_regions(db: &Db) -> usize {
    let mut listings = db.listings();
    let mut updated = 0;

    for listing in listings.iter_mut().filter(|l| l.region().is_none()) {
        listing.region = Some(infer_region(&listing.title, &listing.desc).to_string());
        updated += 1;
    }

    if updated > 0 {
        db.set_listings(&listings);
        info!(updated, "Normalized listing regions");
    }
    updated
}

/// Infer a region from listing text, defaulting to `"Unknown"`.
#[must_use]
pub fn infer_region(title: &str, desc: &str) -> &'static str {
    let text = format!("{title} {desc}").to_lowercase();
    REGION_RULES
        .iter()
        .find(|rule| text.contains(rule.key) && rule.also.is_none_or(|also| text.contains(also)))
        .map_or(UNKNOWN_REGION, |rule| rule.region)
}

fn demo_artist_id(db: &Db) -> Option<UserId> {
    UserRepository::new(db)
        .get_by_email(DEMO_ARTIST_EMAIL)
        .map(|u| u.id)
}

fn demo_artist() -> Option<User> {
    Some(User {
        id: UserId::generate(),
        email: Email::parse(DEMO_ARTIST_EMAIL).ok()?,
        password: DEMO_ARTIST_PASSWORD.to_string(),
        role: Role::Artist,
        profile: Profile {
            name: "Demo Artisan".to_string(),
            bio: "Handmade ceramics & woodworks".to_string(),
            avatar: String::new(),
        },
    })
}

/// The demo catalogue, without regions; normalization fills them in.
fn demo_listings(artist_id: &UserId) -> Vec<Listing> {
    let now = Utc::now();
    SAMPLES
        .iter()
        .filter_map(|sample| {
            Some(Listing {
                id: ListingId::generate(),
                title: sample.title.to_string(),
                price: Price::new(sample.price).ok()?,
                desc: sample.desc.to_string(),
                region: None,
                img: format!("{MEDIA_BASE}/{}", sample.img),
                artist_id: artist_id.clone(),
                created_at: Some(now),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, Storage};

    fn tracked_db() -> (Db, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        (Db::new(Storage::new(backend.clone())), backend)
    }

    fn listing(title: &str, desc: &str, region: Option<&str>) -> Listing {
        Listing {
            id: ListingId::generate(),
            title: title.to_string(),
            price: Price::new(100).unwrap(),
            desc: desc.to_string(),
            region: region.map(str::to_string),
            img: String::new(),
            artist_id: UserId::new("usr_someone"),
            created_at: None,
        }
    }

    #[test]
    fn test_empty_store_is_seeded() {
        let (db, _) = tracked_db();
        let report = run(&db);

        assert!(report.seeded);
        assert!(!report.migrated);
        assert!(report.version_stamped);
        assert_eq!(report.regions_normalized, 4);

        let listings = db.listings();
        assert_eq!(listings.len(), 4);
        let users = db.users();
        assert_eq!(users.len(), 1);
        let artist = users.first().unwrap();
        assert_eq!(artist.role, Role::Artist);
        assert_eq!(artist.email.as_str(), DEMO_ARTIST_EMAIL);
        assert!(listings.iter().all(|l| l.artist_id == artist.id));
        assert_eq!(db.version(), DATA_VERSION);

        let regions: Vec<_> = listings.iter().filter_map(Listing::region).collect();
        assert_eq!(regions, ["Bihar", "Jaipur", "Uttar Pradesh", "West Bengal"]);
    }

    #[test]
    fn test_second_run_writes_nothing() {
        let (db, backend) = tracked_db();
        run(&db);
        let writes = backend.write_count();

        let report = run(&db);
        assert!(!report.changed());
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_legacy_catalogue_is_replaced() {
        let (db, _) = tracked_db();
        let artist = demo_artist().unwrap();
        let artist_id = artist.id.clone();
        db.set_users(&[artist]);
        db.set_listings(&[
            listing("Walnut Serving Board", "", Some("Somewhere")),
            listing("Stoneware Mug", "", None),
        ]);

        let report = run(&db);
        assert!(!report.seeded);
        assert!(report.migrated);

        let listings = db.listings();
        assert_eq!(listings.len(), 4);
        assert!(listings.iter().all(|l| l.artist_id == artist_id));
        assert!(listings.iter().all(|l| l.created_at.is_some()));
        assert_eq!(listings.first().unwrap().title, "Madhubani Paintings");
    }

    #[test]
    fn test_legacy_catalogue_without_demo_artist_gets_fresh_owner() {
        let (db, _) = tracked_db();
        db.set_listings(&[listing("Leather Journal", "", None)]);

        let (replaced, stamped) = migrate_to_v2(&db);
        assert!(replaced && stamped);
        let listings = db.listings();
        let owner = &listings.first().unwrap().artist_id;
        assert!(owner.as_str().starts_with("usr_"));
        assert!(listings.iter().all(|l| &l.artist_id == owner));
    }

    #[test]
    fn test_migration_keeps_custom_listings() {
        let (db, _) = tracked_db();
        db.set_listings(&[listing("Brass Lamp", "", None)]);

        assert_eq!(migrate_to_v2(&db), (false, true));
        assert_eq!(db.listings().first().unwrap().title, "Brass Lamp");
        assert_eq!(db.version(), DATA_VERSION);
    }

    #[test]
    fn test_migration_skipped_at_current_version() {
        let (db, backend) = tracked_db();
        db.set_version(DATA_VERSION);
        db.set_listings(&[listing("Stoneware Mug", "", None)]);
        let writes = backend.write_count();

        assert_eq!(migrate_to_v2(&db), (false, false));
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_reseed_reuses_demo_artist() {
        let (db, _) = tracked_db();
        run(&db);
        let artist_id = db.users().first().unwrap().id.clone();

        // The artist removes every listing; the next start reseeds
        db.set_listings(&[]);
        assert!(seed_if_empty(&db));

        assert_eq!(db.users().len(), 1);
        assert!(db.listings().iter().all(|l| l.artist_id == artist_id));
    }

    #[test]
    fn test_unparseable_listings_block_reseed() {
        let (db, backend) = tracked_db();
        backend
            .set(
                crate::db::keys::LISTINGS,
                r#"[{"id":"itm_1","title":"My Bowl","price":-5,"artistId":"usr_1"}]"#,
            )
            .unwrap();

        assert!(db.listings().is_empty());
        assert!(!seed_if_empty(&db));
        assert!(db.users().is_empty());
        assert!(backend.raw(crate::db::keys::LISTINGS).unwrap().contains("My Bowl"));
    }

    #[test]
    fn test_infer_region() {
        assert_eq!(infer_region("Madhubani Art", ""), "Bihar");
        assert_eq!(infer_region("Vase", "Classic BLUE POTTERY glaze"), "Jaipur");
        assert_eq!(infer_region("Wood Carving", ""), "Uttar Pradesh");
        // Needs both "wood" and "carving"
        assert_eq!(infer_region("Wooden spoon", ""), UNKNOWN_REGION);
        assert_eq!(infer_region("Terracotta Pot", ""), "West Bengal");
        assert_eq!(infer_region("Brass Lamp", ""), UNKNOWN_REGION);
    }

    #[test]
    fn test_normalize_fills_blank_regions_only() {
        let (db, _) = tracked_db();
        db.set_listings(&[
            listing("Terracotta Horse", "", Some("  ")),
            listing("Madhubani Fish", "", Some("Custom Region")),
            listing("Brass Lamp", "", None),
        ]);

        assert_eq!(normalize_listing_regions(&db), 2);
        let regions: Vec<_> = db
            .listings()
            .iter()
            .map(|l| l.region.clone().unwrap())
            .collect();
        assert_eq!(regions, ["West Bengal", "Custom Region", UNKNOWN_REGION]);
        assert_eq!(normalize_listing_regions(&db), 0);
    }
}
