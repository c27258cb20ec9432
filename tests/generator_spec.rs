use planthub::generator::{classify_section, parse_interval, CareSection};
use planthub::models::{CreateTaskInput, TaskKind};
use planthub::store::Store;
use speculate2::speculate;

fn section(section_type: &str, description: &str) -> CareSection {
    CareSection {
        section_type: section_type.to_string(),
        description: description.to_string(),
    }
}

speculate! {
    describe "classify_section" {
        it "recognizes the four well-known kinds" {
            assert_eq!(classify_section("Watering"), TaskKind::Water);
            assert_eq!(classify_section("Fertilizing"), TaskKind::Fertilize);
            assert_eq!(classify_section("Pruning"), TaskKind::Prune);
            assert_eq!(classify_section("Repotting"), TaskKind::Repot);
        }

        it "matches case-insensitively on substrings" {
            assert_eq!(classify_section("WATER needs"), TaskKind::Water);
            assert_eq!(classify_section("Use a balanced fertilizer"), TaskKind::Fertilize);
        }

        it "prefers water over later kinds when both appear" {
            assert_eq!(classify_section("Watering and pruning"), TaskKind::Water);
        }

        it "carries unknown labels verbatim, lowercased" {
            assert_eq!(
                classify_section("Sunlight"),
                TaskKind::Other("sunlight".to_string())
            );
        }
    }

    describe "parse_interval" {
        it "reads watering intervals in days only" {
            assert_eq!(parse_interval(&TaskKind::Water, "Water every 3 days"), Some(3));
            assert_eq!(parse_interval(&TaskKind::Water, "Water every 2 weeks"), None);
        }

        it "reads fertilizing intervals in days, weeks, or months" {
            assert_eq!(
                parse_interval(&TaskKind::Fertilize, "Fertilize every 2 weeks"),
                Some(14)
            );
            assert_eq!(
                parse_interval(&TaskKind::Fertilize, "Feed every 2 months in summer"),
                Some(60)
            );
            assert_eq!(
                parse_interval(&TaskKind::Prune, "Prune every 10 days"),
                Some(10)
            );
        }

        it "reads repotting intervals in months or years" {
            assert_eq!(
                parse_interval(&TaskKind::Repot, "Repot every 1 year"),
                Some(365)
            );
            assert_eq!(
                parse_interval(&TaskKind::Repot, "Repot every 6 months"),
                Some(180)
            );
        }

        it "returns None when no recurrence pattern is present" {
            assert_eq!(
                parse_interval(&TaskKind::Water, "Keep the soil evenly moist"),
                None
            );
        }

        it "never assigns intervals to free-form kinds" {
            assert_eq!(
                parse_interval(
                    &TaskKind::Other("sunlight".to_string()),
                    "Rotate every 3 days"
                ),
                None
            );
        }
    }

    describe "generate_care_tasks" {
        before {
            let store = Store::open_memory().expect("Failed to create in-memory store");
            store.migrate().expect("Failed to run migrations");
        }

        it "creates one task per section, due immediately" {
            let guide = vec![
                section("Watering", "Water every 7 days"),
                section("Pruning", "Prune every 2 weeks"),
            ];

            let created = store.generate_care_tasks(42, &guide).expect("Generation failed");

            assert_eq!(created.len(), 2);
            assert_eq!(created[0].kind, TaskKind::Water);
            assert_eq!(created[0].interval_days, Some(7));
            assert_eq!(created[0].notes, "Water every 7 days");
            assert!(!created[0].completed);
            assert_eq!(created[1].kind, TaskKind::Prune);
            assert_eq!(created[1].interval_days, Some(14));
        }

        it "is idempotent across runs" {
            let guide = vec![section("Watering", "Water every 7 days")];

            store.generate_care_tasks(42, &guide).expect("Generation failed");
            let second = store.generate_care_tasks(42, &guide).expect("Generation failed");

            assert!(second.is_empty());
            assert_eq!(store.all_tasks().len(), 1);
        }

        it "deduplicates sections of the same kind within a run" {
            let guide = vec![
                section("Watering", "Water every 7 days"),
                section("Water needs", "Keep moist"),
            ];

            let created = store.generate_care_tasks(42, &guide).expect("Generation failed");
            assert_eq!(created.len(), 1);
        }

        it "skips kinds that already have a manual task, even completed ones" {
            let manual = store.add_task(CreateTaskInput {
                plant_id: 42,
                kind: TaskKind::Water,
                due_date: chrono::Utc::now(),
                interval_days: None,
                repeat: None,
                notes: String::new(),
            }).expect("Failed to add task");
            store.complete_task(manual.id).expect("Failed to complete");

            let created = store
                .generate_care_tasks(42, &[section("Watering", "Water every 7 days")])
                .expect("Generation failed");
            assert!(created.is_empty());
        }

        it "scopes deduplication per plant" {
            let guide = vec![section("Watering", "Water every 7 days")];

            store.generate_care_tasks(1, &guide).expect("Generation failed");
            let created = store.generate_care_tasks(2, &guide).expect("Generation failed");

            assert_eq!(created.len(), 1);
            assert_eq!(store.all_tasks().len(), 2);
        }

        it "creates one-off tasks for free-form sections" {
            let created = store
                .generate_care_tasks(42, &[section("Sunlight", "Bright indirect light")])
                .expect("Generation failed");

            assert_eq!(created.len(), 1);
            assert_eq!(created[0].kind, TaskKind::Other("sunlight".to_string()));
            assert_eq!(created[0].interval_days, None);
        }
    }
}
