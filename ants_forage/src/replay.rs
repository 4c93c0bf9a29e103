use crate::config::SimulationConfig;
use crate::error::ReplayError;
use serde::Serialize;
use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};
use uuid::Uuid;

pub fn create_replay_logger(
    filename: Option<String>,
    config: &SimulationConfig,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, config.clone())),
    }
}

pub trait ReplayLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_tick(&mut self, record: TickRecord) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, tick: usize, event: Event) {}

    #[allow(unused_variables)]
    fn log_finished(&mut self, tick: usize) {}

    fn save(&self) -> Result<(), ReplayError> {
        Ok(())
    }

    fn log_pickup(&mut self, tick: usize, ant: usize, location: (f64, f64)) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Pickup,
                ant: Some(ant),
                location: Some(location),
                cells: None,
            },
        );
    }

    fn log_delivery(&mut self, tick: usize, ant: usize) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::Delivery,
                ant: Some(ant),
                location: None,
                cells: None,
            },
        );
    }

    fn log_food_placed(&mut self, tick: usize, location: (f64, f64), cells: usize) {
        self.log_event(
            tick,
            Event {
                event_type: EventType::FoodPlaced,
                ant: None,
                location: Some(location),
                cells: Some(cells),
            },
        );
    }
}

/// Aggregate counters of one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: usize,
    pub elapsed: f64,
    pub food_delivered: usize,
    pub carrying: usize,
    pub food_remaining: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EventType {
    Pickup,
    Delivery,
    FoodPlaced,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    event_type: EventType,
    ant: Option<usize>,
    location: Option<(f64, f64)>,
    cells: Option<usize>,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    run_id: Uuid,
    config: SimulationConfig,
    ticks: Vec<TickRecord>,
    events: HashMap<usize, Vec<Event>>,
    finished_at: Option<usize>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, config: SimulationConfig) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            run_id: Uuid::new_v4(),
            config,
            ticks: Vec::new(),
            events: HashMap::new(),
            finished_at: None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let ticks: Vec<_> = self
            .ticks
            .iter()
            .map(|record| {
                json!({
                    "tick": record.tick,
                    "elapsed": record.elapsed,
                    "food_delivered": record.food_delivered,
                    "carrying": record.carrying,
                    "food_remaining": record.food_remaining,
                    "events": self.events.get(&record.tick).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        json!({
            "run_id": self.run_id.to_string(),
            "grid": {
                "width": self.config.grid_width,
                "height": self.config.grid_height,
                "cell_size": self.config.cell_size,
            },
            "config": self.config,
            // Events logged before the first tick, e.g. the initial food placements
            "setup": self.events.get(&0).unwrap_or(&Vec::new()),
            "ticks": ticks,
            "finished_at": self.finished_at,
        })
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_tick(&mut self, record: TickRecord) {
        self.ticks.push(record);
    }

    fn log_event(&mut self, tick: usize, event: Event) {
        self.events.entry(tick).or_default().push(event);
    }

    fn log_finished(&mut self, tick: usize) {
        self.finished_at = Some(tick);
        self.log_event(
            tick,
            Event {
                event_type: EventType::Finished,
                ant: None,
                location: None,
                cells: None,
            },
        );
    }

    fn save(&self) -> Result<(), ReplayError> {
        let file = File::create(&self.filename)?;
        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        Ok(())
    }
}
