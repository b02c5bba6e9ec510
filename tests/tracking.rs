use std::time::Duration;

use anyhow::Result;
use products_hr::{
    Candidate,
    tracking::{Coordinates, LocationTracker, TrackOutcome},
};
use serde_json::json;
use suite_tests::{MockBackend, MockData, session};

fn located(outcome: TrackOutcome) -> products_hr::tracking::TrackedLocation {
    match outcome {
        TrackOutcome::Located(location) => location,
        TrackOutcome::Superseded => panic!("lookup was superseded"),
    }
}

#[tokio::test]
async fn resolves_both_addresses() -> Result<()> {
    let backend = MockBackend::start(MockData {
        locations: [(
            "1".to_string(),
            json!({"latitude": "18.5204", "longitude": 73.8567, "lastLatitude": 18.5, "lastLongitude": 73.8}),
        )]
        .into(),
        addresses: [
            ("18.5204,73.8567".to_string(), "Shivajinagar, Pune".to_string()),
            ("18.5,73.8".to_string(), "Kothrud, Pune".to_string()),
        ]
        .into(),
        ..MockData::default()
    })
    .await?;

    let tracker = LocationTracker::new(backend.client());
    let location = located(tracker.track(&session(), &Candidate::new("1", "Ann Lee")).await?);
    assert_eq!(location.current, Coordinates::from((18.5204, 73.8567)));
    assert_eq!(location.last_known, Some(Coordinates::from((18.5, 73.8))));
    assert_eq!(location.address, "Shivajinagar, Pune");
    assert_eq!(location.last_address, "Kothrud, Pune");
    assert_eq!(tracker.shown().await, Some(location));
    Ok(())
}

#[tokio::test]
async fn partial_last_fix_and_missing_geocoder() -> Result<()> {
    let backend = MockBackend::start(MockData {
        locations: [(
            "2".to_string(),
            json!({"latitude": 0, "longitude": 0, "lastLatitude": 18.5, "lastLongitude": null}),
        )]
        .into(),
        addresses: [("0,0".to_string(), "Gulf of Guinea".to_string())].into(),
        ..MockData::default()
    })
    .await?;
    let employee = Candidate::new("2", "Bob Leary");

    let location = located(
        LocationTracker::new(backend.client())
            .track(&session(), &employee)
            .await?,
    );
    assert_eq!(location.current, Coordinates::from((0.0, 0.0)));
    assert_eq!(location.last_known, None);
    assert_eq!(location.address, "Gulf of Guinea");
    assert_eq!(location.last_address, "");

    let location = located(
        LocationTracker::new(backend.client_without_geocoder())
            .track(&session(), &employee)
            .await?,
    );
    assert_eq!(location.address, "");
    Ok(())
}

#[tokio::test]
async fn failures_carry_user_messages() -> Result<()> {
    let backend = MockBackend::start(MockData {
        locations: [("3".to_string(), json!({"latitude": "north", "longitude": 73.8}))].into(),
        ..MockData::default()
    })
    .await?;
    let tracker = LocationTracker::new(backend.client());

    let err = tracker
        .track(&session(), &Candidate::new("3", "Carol Tran"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "No location data available for this employee");

    let err = tracker
        .track(&session(), &Candidate::new("404", "Nobody"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Location not found for employee");
    assert_eq!(tracker.shown().await, None);
    Ok(())
}

#[tokio::test]
async fn slow_earlier_lookup_never_overwrites_newer_one() -> Result<()> {
    let backend = MockBackend::start(MockData {
        locations: [
            ("slow".to_string(), json!({"latitude": 1.0, "longitude": 1.0})),
            ("fast".to_string(), json!({"latitude": 2.0, "longitude": 2.0})),
        ]
        .into(),
        location_delays: [("slow".to_string(), Duration::from_millis(300))].into(),
        ..MockData::default()
    })
    .await?;
    let tracker = LocationTracker::new(backend.client());
    let session = session();
    let slow = Candidate::new("slow", "First Pick");
    let fast = Candidate::new("fast", "Second Pick");

    let (first, second) = tokio::join!(
        tracker.track(&session, &slow),
        tracker.track(&session, &fast),
    );
    assert_eq!(first?, TrackOutcome::Superseded);
    let second = located(second?);
    assert_eq!(second.employee, fast);

    let shown = tracker.shown().await.map(|location| location.employee.id);
    assert_eq!(shown.as_deref(), Some("fast"));
    Ok(())
}
