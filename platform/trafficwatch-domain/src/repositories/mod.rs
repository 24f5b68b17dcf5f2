pub mod traffic_events;
