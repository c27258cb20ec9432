mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::*;

/// Namespace prefix for collection keys, matching the persisted state layout.
const KEY_PREFIX: &str = "planthub_";

/// The six top-level collections, in export order.
pub const COLLECTIONS: &[&str] = &["plants", "room", "tasks", "journal", "settings", "stats"];

/// Persistent store holding every collection as a whole JSON document under a
/// namespaced key.
///
/// All writes are last-write-wins on the entire collection: every mutation is
/// a full read-modify-write. Reads never fail the caller; malformed or absent
/// stored data comes back as the collection's documented default and the
/// fault is logged.
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Store path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "planthub")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("planthub.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run schema migrations and seed any absent collection with its default
    /// document. Idempotent.
    pub fn migrate(&self) -> Result<()> {
        {
            let conn = self.conn.lock().expect("store lock poisoned");
            schema::run_migrations(&conn)?;
        }
        self.seed_defaults()
    }

    fn seed_defaults(&self) -> Result<()> {
        if self.get_raw("plants")?.is_none() {
            self.write("plants", &Vec::<Plant>::new())?;
        }
        if self.get_raw("room")?.is_none() {
            self.write("room", &RoomLayout::default())?;
        }
        if self.get_raw("tasks")?.is_none() {
            self.write("tasks", &Vec::<Task>::new())?;
        }
        if self.get_raw("journal")?.is_none() {
            self.write("journal", &Vec::<JournalEntry>::new())?;
        }
        if self.get_raw("settings")?.is_none() {
            self.write("settings", &Settings::default())?;
        }
        if self.get_raw("stats")?.is_none() {
            self.write("stats", &Stats::default())?;
        }
        Ok(())
    }

    // ============================================================
    // Raw collection access
    // ============================================================

    fn get_raw(&self, name: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("store lock poisoned");
        let mut stmt = conn.prepare("SELECT value FROM collections WHERE key = ?")?;
        let mut rows = stmt.query([format!("{}{}", KEY_PREFIX, name)])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set_raw(&self, name: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("store lock poisoned");
        conn.execute(
            "INSERT INTO collections (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (format!("{}{}", KEY_PREFIX, name), value),
        )?;
        Ok(())
    }

    /// Read a whole collection. Absent or malformed data yields the default
    /// and a diagnostic; the fault is never surfaced to the caller.
    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match self.get_raw(name) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Malformed {} collection, using default: {}", name, e);
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!("Failed to read {} collection, using default: {}", name, e);
                T::default()
            }
        }
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        self.set_raw(name, &serde_json::to_string(value)?)
    }

    // ============================================================
    // Plant operations
    // ============================================================

    pub fn all_plants(&self) -> Vec<Plant> {
        self.read("plants")
    }

    pub fn get_plant(&self, id: i64) -> Option<Plant> {
        self.all_plants().into_iter().find(|p| p.id == id)
    }

    /// Resolve a plant reference to its nickname, or the placeholder label
    /// when the plant has been removed.
    pub fn plant_label(&self, id: i64) -> String {
        self.get_plant(id)
            .map(|p| p.nickname)
            .unwrap_or_else(|| "Unknown Plant".to_string())
    }

    pub fn add_plant(&self, input: CreatePlantInput) -> Result<Plant> {
        let mut plants = self.all_plants();

        let id = match input.id {
            Some(id) => {
                if plants.iter().any(|p| p.id == id) {
                    anyhow::bail!("Plant {} already exists", id);
                }
                id
            }
            None => allocate_id(plants.iter().map(|p| p.id)),
        };

        let plant = Plant {
            id,
            nickname: input.nickname.unwrap_or_else(|| input.name.clone()),
            name: input.name,
            scientific_name: input.scientific_name,
            image: input.image,
            thumbnail: input.thumbnail,
            custom_image: None,
            cycle: input.cycle,
            watering: input.watering,
            sunlight: input.sunlight,
            care_level: input.care_level,
            growth_rate: input.growth_rate,
            indoor: input.indoor,
            poisonous: input.poisonous,
            edible: input.edible,
            medicinal: input.medicinal,
            drought_tolerant: input.drought_tolerant,
            invasive: input.invasive,
            tropical: input.tropical,
            health: HealthStatus::Good,
            last_watered: None,
            last_fertilized: None,
            notes: String::new(),
            location: "indoor".to_string(),
            pot_size: "medium".to_string(),
            soil_type: "regular".to_string(),
            added_date: Utc::now(),
        };

        plants.push(plant.clone());
        self.write("plants", &plants)?;
        self.refresh_counts()?;
        Ok(plant)
    }

    pub fn update_plant(&self, id: i64, input: UpdatePlantInput) -> Result<Option<Plant>> {
        let mut plants = self.all_plants();
        let Some(plant) = plants.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(nickname) = input.nickname {
            plant.nickname = nickname;
        }
        if let Some(custom_image) = input.custom_image {
            plant.custom_image = Some(custom_image);
        }
        if let Some(health) = input.health {
            plant.health = health;
        }
        if let Some(notes) = input.notes {
            plant.notes = notes;
        }
        if let Some(location) = input.location {
            plant.location = location;
        }
        if let Some(pot_size) = input.pot_size {
            plant.pot_size = pot_size;
        }
        if let Some(soil_type) = input.soil_type {
            plant.soil_type = soil_type;
        }
        if let Some(last_watered) = input.last_watered {
            plant.last_watered = Some(last_watered);
        }
        if let Some(last_fertilized) = input.last_fertilized {
            plant.last_fertilized = Some(last_fertilized);
        }

        let updated = plant.clone();
        self.write("plants", &plants)?;
        Ok(Some(updated))
    }

    /// Stamp the plant as watered now.
    pub fn water_plant(&self, id: i64) -> Result<Option<Plant>> {
        self.update_plant(
            id,
            UpdatePlantInput {
                last_watered: Some(Utc::now()),
                ..Default::default()
            },
        )
    }

    /// Stamp the plant as fertilized now.
    pub fn fertilize_plant(&self, id: i64) -> Result<Option<Plant>> {
        self.update_plant(
            id,
            UpdatePlantInput {
                last_fertilized: Some(Utc::now()),
                ..Default::default()
            },
        )
    }

    /// Remove a plant from the collection and from the room layout. Tasks
    /// and journal entries referencing it are left in place.
    pub fn remove_plant(&self, id: i64) -> Result<bool> {
        let mut plants = self.all_plants();
        let before = plants.len();
        plants.retain(|p| p.id != id);
        if plants.len() == before {
            return Ok(false);
        }
        self.write("plants", &plants)?;
        self.remove_placement(id)?;
        self.refresh_counts()?;
        Ok(true)
    }

    // ============================================================
    // Task operations
    // ============================================================

    pub fn all_tasks(&self) -> Vec<Task> {
        self.read("tasks")
    }

    pub fn get_task(&self, id: i64) -> Option<Task> {
        self.all_tasks().into_iter().find(|t| t.id == id)
    }

    pub fn add_task(&self, input: CreateTaskInput) -> Result<Task> {
        let mut tasks = self.all_tasks();
        let task = Task {
            id: allocate_id(tasks.iter().map(|t| t.id)),
            plant_id: input.plant_id,
            kind: input.kind,
            due_date: input.due_date,
            interval_days: input.interval_days,
            repeat: input.repeat,
            completed: false,
            notes: input.notes,
            created_at: Utc::now(),
        };
        tasks.push(task.clone());
        self.write("tasks", &tasks)?;
        Ok(task)
    }

    /// Partial update. Flipping `completed` to `true` triggers a care-streak
    /// update; due-date or interval edits do not.
    pub fn update_task(&self, id: i64, input: UpdateTaskInput) -> Result<Option<Task>> {
        let mut tasks = self.all_tasks();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        let newly_completed = input.completed == Some(true) && !task.completed;

        if let Some(due_date) = input.due_date {
            task.due_date = due_date;
        }
        if let Some(interval_days) = input.interval_days {
            task.interval_days = Some(interval_days);
        }
        if let Some(repeat) = input.repeat {
            task.repeat = Some(repeat);
        }
        if let Some(notes) = input.notes {
            task.notes = notes;
        }
        if let Some(completed) = input.completed {
            task.completed = completed;
        }

        let updated = task.clone();
        self.write("tasks", &tasks)?;

        if newly_completed {
            self.update_care_streak()?;
        }

        Ok(Some(updated))
    }

    pub fn remove_task(&self, id: i64) -> Result<bool> {
        let mut tasks = self.all_tasks();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.write("tasks", &tasks)?;
        Ok(true)
    }

    // ============================================================
    // Journal operations
    // ============================================================

    /// Journal entries, newest first. `plant_id` filters to one plant's
    /// entries.
    pub fn entries(&self, plant_id: Option<i64>) -> Vec<JournalEntry> {
        let journal: Vec<JournalEntry> = self.read("journal");
        match plant_id {
            Some(id) => journal
                .into_iter()
                .filter(|e| e.plant_id == Some(id))
                .collect(),
            None => journal,
        }
    }

    pub fn get_entry(&self, id: i64) -> Option<JournalEntry> {
        self.entries(None).into_iter().find(|e| e.id == id)
    }

    pub fn add_entry(&self, input: CreateJournalInput) -> Result<JournalEntry> {
        let mut journal = self.entries(None);
        let entry = JournalEntry {
            id: allocate_id(journal.iter().map(|e| e.id)),
            plant_id: input.plant_id,
            content: input.content,
            images: input.images,
            created_at: Utc::now(),
        };
        // Insert at the head to keep the newest-first ordering.
        journal.insert(0, entry.clone());
        self.write("journal", &journal)?;
        self.refresh_counts()?;
        Ok(entry)
    }

    pub fn update_entry(&self, id: i64, input: UpdateJournalInput) -> Result<Option<JournalEntry>> {
        let mut journal = self.entries(None);
        let Some(entry) = journal.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        if let Some(content) = input.content {
            entry.content = content;
        }
        if let Some(images) = input.images {
            entry.images = images;
        }

        let updated = entry.clone();
        self.write("journal", &journal)?;
        Ok(Some(updated))
    }

    pub fn remove_entry(&self, id: i64) -> Result<bool> {
        let mut journal = self.entries(None);
        let before = journal.len();
        journal.retain(|e| e.id != id);
        if journal.len() == before {
            return Ok(false);
        }
        self.write("journal", &journal)?;
        self.refresh_counts()?;
        Ok(true)
    }

    // ============================================================
    // Room operations
    // ============================================================

    pub fn room(&self) -> RoomLayout {
        self.read("room")
    }

    /// Merge cosmetic settings into the room, leaving the layout untouched.
    pub fn update_room(&self, input: UpdateRoomInput) -> Result<RoomLayout> {
        let mut room = self.room();
        if let Some(theme) = input.theme {
            room.theme = theme;
        }
        if let Some(wallpaper) = input.wallpaper {
            room.wallpaper = wallpaper;
        }
        if let Some(plant_size) = input.plant_size {
            room.plant_size = plant_size;
        }
        self.write("room", &room)?;
        Ok(room)
    }

    pub fn set_layout(&self, layout: Vec<Placement>) -> Result<RoomLayout> {
        let mut room = self.room();
        room.layout = layout;
        self.write("room", &room)?;
        Ok(room)
    }

    /// Place a plant in the room, replacing any existing placement for it.
    pub fn place_plant(&self, plant_id: i64, x: String, y: String) -> Result<RoomLayout> {
        let mut room = self.room();
        let placement = Placement { plant_id, x, y };
        match room.layout.iter_mut().find(|p| p.plant_id == plant_id) {
            Some(existing) => *existing = placement,
            None => room.layout.push(placement),
        }
        self.write("room", &room)?;
        Ok(room)
    }

    pub fn remove_placement(&self, plant_id: i64) -> Result<bool> {
        let mut room = self.room();
        let before = room.layout.len();
        room.layout.retain(|p| p.plant_id != plant_id);
        if room.layout.len() == before {
            return Ok(false);
        }
        self.write("room", &room)?;
        Ok(true)
    }

    // ============================================================
    // Settings operations
    // ============================================================

    pub fn settings(&self) -> Settings {
        self.read("settings")
    }

    pub fn update_settings(&self, input: UpdateSettingsInput) -> Result<Settings> {
        let mut settings = self.settings();
        if let Some(notifications) = input.notifications {
            settings.notifications = notifications;
        }
        if let Some(dark_mode) = input.dark_mode {
            settings.dark_mode = dark_mode;
        }
        if let Some(water_reminders) = input.water_reminders {
            settings.water_reminders = water_reminders;
        }
        if let Some(care_streak_start) = input.care_streak_start {
            settings.care_streak_start = Some(care_streak_start);
        }
        self.write("settings", &settings)?;
        Ok(settings)
    }

    // ============================================================
    // Stats operations
    // ============================================================

    pub fn stats(&self) -> Stats {
        self.read("stats")
    }

    pub(crate) fn write_stats(&self, stats: &Stats) -> Result<()> {
        self.write("stats", stats)
    }

    /// Recount plants and journal entries from their source collections.
    /// A full recount rather than an incremental counter, so the cached
    /// values cannot drift. The care streak is owned by the scheduler and is
    /// not touched here.
    pub fn refresh_counts(&self) -> Result<Stats> {
        let mut stats = self.stats();
        stats.plant_count = self.all_plants().len() as u32;
        stats.journal_count = self.entries(None).len() as u32;
        self.write_stats(&stats)?;
        Ok(stats)
    }

    // ============================================================
    // Export / import
    // ============================================================

    /// Snapshot of all six collections as a single JSON document.
    pub fn export_data(&self) -> Result<serde_json::Value> {
        let mut doc = serde_json::Map::new();
        for name in COLLECTIONS {
            let value = match self.get_raw(name)? {
                Some(text) => serde_json::from_str(&text).unwrap_or(serde_json::Value::Null),
                None => serde_json::Value::Null,
            };
            doc.insert((*name).to_string(), value);
        }
        Ok(serde_json::Value::Object(doc))
    }

    /// Restore a snapshot, overwriting collections wholesale by name.
    ///
    /// The document is parsed in full before the first write, so a malformed
    /// snapshot fails without partially applying. Individual collections are
    /// not schema-validated; a wrong-shaped collection surfaces later as a
    /// read fault and yields the default.
    pub fn import_data(&self, json: &str) -> Result<()> {
        let doc: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| anyhow::anyhow!("Invalid snapshot: {}", e))?;

        for name in COLLECTIONS {
            if let Some(value) = doc.get(*name) {
                self.set_raw(name, &serde_json::to_string(value)?)?;
            }
        }
        Ok(())
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Time-derived identifier: milliseconds since the epoch, bumped past the
/// largest existing id so ids stay unique when allocations land in the same
/// millisecond.
fn allocate_id<I: IntoIterator<Item = i64>>(existing: I) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}
