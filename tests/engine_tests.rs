use rdietlogger::core::achievement::catalog::{Achievement, bind};
use rdietlogger::core::achievement::context::EvaluationContext;
use rdietlogger::core::achievement::evaluator::evaluate;
use rdietlogger::core::achievement::granter::grant;
use rdietlogger::core::achievement::store::AchievementStore;
use rdietlogger::core::achievement::AchievementEngine;
use rdietlogger::errors::{AppError, AppResult, Feed};
use rdietlogger::models::check_in::CheckIn;
use rdietlogger::models::food_record::FoodRecord;
use rdietlogger::models::item::{ACHIEVEMENT_SOURCE, CatalogItem, OwnedItem};
use rdietlogger::models::item_id::RawItemId;
use rdietlogger::models::meal_type::MealType;
use std::cell::RefCell;
use std::collections::HashSet;

mod common;
use common::{meal_with, ts};

/// In-memory store; ids already granted come back as floats, the way a
/// loosely typed aggregate read can return them.
#[derive(Default)]
struct MockStore {
    check_ins: Vec<CheckIn>,
    food_records: Vec<FoodRecord>,
    owned: Vec<RawItemId>,
    catalog: Vec<CatalogItem>,
    failing_feed: Option<Feed>,
    failing_grant: Option<u64>,
    granted: RefCell<Vec<OwnedItem>>,
    grant_attempts: RefCell<Vec<u64>>,
    pages_read: RefCell<Vec<u32>>,
}

impl MockStore {
    fn fail_if(&self, feed: Feed) -> AppResult<()> {
        if self.failing_feed == Some(feed) {
            return Err(AppError::Other("connection reset".into()));
        }
        Ok(())
    }
}

impl AchievementStore for MockStore {
    fn user_check_ins(&self, _user_id: u64) -> AppResult<Vec<CheckIn>> {
        self.fail_if(Feed::CheckIns)?;
        Ok(self.check_ins.clone())
    }

    fn user_food_records(&self, _user_id: u64) -> AppResult<Vec<FoodRecord>> {
        self.fail_if(Feed::FoodRecords)?;
        Ok(self.food_records.clone())
    }

    fn user_owned_item_ids(&self, _user_id: u64) -> AppResult<Vec<RawItemId>> {
        self.fail_if(Feed::OwnedItems)?;
        let mut ids = self.owned.clone();
        ids.extend(
            self.granted
                .borrow()
                .iter()
                .map(|o| RawItemId::Float(o.item_id as f64)),
        );
        Ok(ids)
    }

    fn catalog_page(&self, page: u32, page_size: u32) -> AppResult<(Vec<CatalogItem>, u64)> {
        self.fail_if(Feed::Catalog { page })?;
        self.pages_read.borrow_mut().push(page);

        let start = ((page - 1) * page_size) as usize;
        let items = self
            .catalog
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok((items, self.catalog.len() as u64))
    }

    fn insert_owned_item_if_absent(&self, item: &OwnedItem) -> AppResult<bool> {
        self.grant_attempts.borrow_mut().push(item.item_id);
        if self.failing_grant == Some(item.item_id) {
            return Err(AppError::Other("disk full".into()));
        }

        let mut granted = self.granted.borrow_mut();
        if granted.iter().any(|g| g.item_id == item.item_id) {
            return Ok(false);
        }
        granted.push(item.clone());
        Ok(true)
    }
}

/// Every achievement item, ids 101..=113 in canonical order.
fn full_catalog() -> Vec<CatalogItem> {
    Achievement::ALL
        .iter()
        .zip(101u64..)
        .map(|(a, id)| {
            let mut item = CatalogItem::new(a.catalog_name(), a.description(), "test");
            item.id = id;
            item
        })
        .collect()
}

fn id_of(catalog: &[CatalogItem], a: Achievement) -> u64 {
    catalog
        .iter()
        .find(|i| i.name == a.catalog_name())
        .map(|i| i.id)
        .expect("achievement in catalog")
}

/// A single lunch: unlocks the first record and the quiet nights, nothing else.
fn one_lunch() -> Vec<FoodRecord> {
    vec![meal_with(
        "2025-03-10 12:00",
        "rice",
        MealType::Lunch,
        500.0,
        10.0,
        10.0,
        60.0,
    )]
}

#[test]
fn first_record_unlocks_expected_items() {
    let catalog = full_catalog();
    let store = MockStore {
        food_records: one_lunch(),
        catalog: catalog.clone(),
        ..MockStore::default()
    };

    let run = AchievementEngine::new(&store, 100)
        .run(1, ts("2025-03-10 20:00"))
        .expect("run");

    let expected = vec![
        id_of(&catalog, Achievement::FirstFoodRecord),
        id_of(&catalog, Achievement::NoLateNightEating),
    ];
    assert_eq!(run.newly_unlocked, expected);
    assert!(run.unbound.is_empty());
    assert!(run.outcome.is_ok());
    assert_eq!(run.outcome.granted.len(), 2);
    assert_eq!(run.checked, 13);

    for owned in store.granted.borrow().iter() {
        assert_eq!(owned.user_id, 1);
        assert_eq!(owned.quantity, 1);
        assert_eq!(owned.obtained_from, ACHIEVEMENT_SOURCE);
        assert_eq!(owned.obtained_at, ts("2025-03-10 20:00"));
    }
}

#[test]
fn second_run_grants_nothing_new() {
    let store = MockStore {
        food_records: one_lunch(),
        catalog: full_catalog(),
        ..MockStore::default()
    };
    let engine = AchievementEngine::new(&store, 100);
    let now = ts("2025-03-10 20:00");

    let first = engine.run(1, now).expect("first run");
    assert!(!first.newly_unlocked.is_empty());

    let second = engine.run(1, now).expect("second run");
    assert!(second.newly_unlocked.is_empty());
    assert!(second.outcome.granted.is_empty());
    assert_eq!(store.granted.borrow().len(), first.newly_unlocked.len());
}

#[test]
fn owned_ids_in_any_shape_block_regrant() {
    let catalog = full_catalog();
    let first = id_of(&catalog, Achievement::FirstFoodRecord);
    let quiet = id_of(&catalog, Achievement::NoLateNightEating);

    let store = MockStore {
        food_records: one_lunch(),
        owned: vec![
            RawItemId::Text(format!(" {} ", first)),
            RawItemId::Signed(quiet as i64),
            RawItemId::Float(-1.0),
        ],
        catalog,
        ..MockStore::default()
    };

    let run = AchievementEngine::new(&store, 100)
        .run(1, ts("2025-03-10 20:00"))
        .expect("run");
    assert!(run.newly_unlocked.is_empty());
}

#[test]
fn catalog_is_read_across_all_pages() {
    let store = MockStore {
        food_records: one_lunch(),
        catalog: full_catalog(),
        ..MockStore::default()
    };

    let ctx = EvaluationContext::gather(&store, 1, ts("2025-03-10 20:00"), 5).expect("gather");

    assert_eq!(ctx.catalog.len(), 13);
    assert_eq!(*store.pages_read.borrow(), vec![1, 2, 3]);
    assert!(bind(&ctx).unbound.is_empty());
}

#[test]
fn failing_feed_aborts_and_is_named() {
    let cases = [
        (Feed::CheckIns, "check-ins"),
        (Feed::FoodRecords, "food records"),
        (Feed::OwnedItems, "owned items"),
        (Feed::Catalog { page: 2 }, "catalog page 2"),
    ];

    for (feed, label) in cases {
        let store = MockStore {
            food_records: one_lunch(),
            catalog: full_catalog(),
            failing_feed: Some(feed),
            ..MockStore::default()
        };

        let err = AchievementEngine::new(&store, 5)
            .run(1, ts("2025-03-10 20:00"))
            .expect_err("feed failure");

        match &err {
            AppError::Feed { feed: f, .. } => assert_eq!(*f, feed),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains(label));
        assert!(store.grant_attempts.borrow().is_empty());
    }
}

#[test]
fn names_missing_from_catalog_are_reported_not_checked() {
    let catalog: Vec<CatalogItem> = full_catalog().into_iter().take(2).collect();
    let store = MockStore {
        food_records: one_lunch(),
        catalog,
        ..MockStore::default()
    };

    let run = AchievementEngine::new(&store, 100)
        .run(1, ts("2025-03-10 20:00"))
        .expect("run");

    assert_eq!(run.unbound.len(), 11);
    assert!(!run.unbound.contains(&Achievement::FirstFoodRecord));
    assert!(run.unbound.contains(&Achievement::NoLateNightEating));
    assert_eq!(run.newly_unlocked, vec![101]);
}

#[test]
fn evaluator_skips_owned_items() {
    let catalog = full_catalog();
    let ctx = EvaluationContext {
        user_id: 1,
        now: ts("2025-03-10 20:00"),
        food_records: one_lunch(),
        catalog: catalog.clone(),
        ..EvaluationContext::default()
    };
    let table = bind(&ctx);
    assert_eq!(table.len(), 13);

    let first = id_of(&catalog, Achievement::FirstFoodRecord);
    let quiet = id_of(&catalog, Achievement::NoLateNightEating);

    let owned: HashSet<u64> = [first].into_iter().collect();
    let unlocked = evaluate(&table, &owned);
    let expected: HashSet<u64> = [quiet].into_iter().collect();
    assert_eq!(unlocked, expected);
}

#[test]
fn grant_stops_at_first_failure() {
    let store = MockStore {
        failing_grant: Some(2),
        ..MockStore::default()
    };

    let outcome = grant(&store, 7, &[1, 2, 3], ts("2025-03-10 20:00"));

    assert_eq!(outcome.granted.len(), 1);
    assert_eq!(outcome.granted[0].item_id, 1);
    match outcome.error {
        Some(AppError::Grant { item_id, .. }) => assert_eq!(item_id, 2),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(*store.grant_attempts.borrow(), vec![1, 2]);
}

#[test]
fn grant_edge_cases() {
    let store = MockStore::default();
    let now = ts("2025-03-10 20:00");

    let empty = grant(&store, 1, &[], now);
    assert!(empty.is_ok());
    assert!(empty.granted.is_empty());

    let no_user = grant(&store, 0, &[1], now);
    assert!(matches!(no_user.error, Some(AppError::MissingUser)));
    assert!(store.grant_attempts.borrow().is_empty());

    // an id granted concurrently is skipped, not failed
    let first = grant(&store, 1, &[5], now);
    let again = grant(&store, 1, &[5], now);
    assert_eq!(first.granted.len(), 1);
    assert!(again.is_ok());
    assert!(again.granted.is_empty());
    assert_eq!(again.already_owned, vec![5]);
}

#[test]
fn empty_catalog_checks_and_grants_nothing() {
    let store = MockStore {
        food_records: one_lunch(),
        ..MockStore::default()
    };

    let run = AchievementEngine::new(&store, 100)
        .run(1, ts("2025-03-10 20:00"))
        .expect("run");

    assert_eq!(run.checked, 0);
    assert!(run.newly_unlocked.is_empty());
    assert_eq!(run.unbound.len(), Achievement::ALL.len());
    assert!(store.grant_attempts.borrow().is_empty());
}
