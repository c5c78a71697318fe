//! Rider-facing itinerary types.

/// One leg of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Wait at a stop for the next bus.
    Wait { stop_name: String, time: f64 },

    /// Ride a bus for `span_count` consecutive stop-to-stop hops.
    Ride {
        bus_name: String,
        time: f64,
        span_count: usize,
    },
}

impl Item {
    /// Minutes spent on this leg.
    pub fn time(&self) -> f64 {
        match self {
            Item::Wait { time, .. } | Item::Ride { time, .. } => *time,
        }
    }
}

/// A minimum-time itinerary between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Total minutes, waits included.
    pub total_time: f64,
    /// Legs in travel order.
    pub items: Vec<Item>,
}

impl RouteResult {
    /// Number of buses boarded.
    pub fn ride_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, Item::Ride { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_time() {
        let wait = Item::Wait {
            stop_name: "A".into(),
            time: 6.0,
        };
        let ride = Item::Ride {
            bus_name: "297".into(),
            time: 1.5,
            span_count: 2,
        };
        assert_eq!(wait.time(), 6.0);
        assert_eq!(ride.time(), 1.5);

        let route = RouteResult {
            total_time: 7.5,
            items: vec![wait, ride],
        };
        assert_eq!(route.ride_count(), 1);
    }
}
