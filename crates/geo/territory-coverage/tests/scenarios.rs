use territory_coverage::test_support::{StaticGeocoder, StaticTerritories};
use territory_coverage::{
    BoundarySource, BoundarySynthesizer, CoverageChecker, CoverageError, CoverageStatus,
    GeocodingError, Territory,
};

fn billings_geocoder() -> StaticGeocoder {
    StaticGeocoder::new()
        .with("2800 1st Ave N, Billings, MT", 45.75, -108.5)
        .with("1437 Larimer St, Denver, CO", 39.7392, -104.9903)
        .with("59101", 45.75, -108.5)
        .with("59102", 45.78, -108.50)
}

#[tokio::test]
async fn address_at_square_center_is_covered() {
    let territories = StaticTerritories::new(vec![
        Territory::new("bil", "Billings").with_zip_codes(["59101"]),
    ]);
    let checker = CoverageChecker::new(billings_geocoder(), &territories);

    let result = checker.check("2800 1st Ave N, Billings, MT").await.unwrap();

    assert_eq!(result.status, CoverageStatus::Covered);
    let covering = result.covering_territory.unwrap();
    assert_eq!(covering.territory.id, "bil");
    assert_eq!(covering.boundary.source, BoundarySource::SquareFallback);
    assert!(result.closest_territory.is_none());
    assert_eq!(result.territories_checked, 1);
}

#[tokio::test]
async fn distant_address_reports_closest_territory() {
    let territories = StaticTerritories::new(vec![
        Territory::new("bil", "Billings").with_zip_codes(["59102"]),
    ]);
    let checker = CoverageChecker::new(billings_geocoder(), &territories);

    let result = checker.check("1437 Larimer St, Denver, CO").await.unwrap();

    assert_eq!(result.status, CoverageStatus::NotCovered);
    assert!(result.covering_territory.is_none());
    let closest = result.closest_territory.unwrap();
    assert_eq!(closest.territory.name, "Billings");
    let km = closest.distance.meters / 1_000.0;
    assert!((700.0..760.0).contains(&km), "haversine Denver to Billings was {km} km");
    assert!((closest.distance.miles - closest.distance.meters * 0.000_621_371).abs() < 1e-6);
}

#[tokio::test]
async fn inactive_territory_never_matches() {
    let territories = StaticTerritories::new(vec![
        Territory::new("bil", "Billings")
            .with_zip_codes(["59101"])
            .with_active(false),
    ]);
    let checker = CoverageChecker::new(billings_geocoder(), &territories);

    let result = checker.check("2800 1st Ave N, Billings, MT").await.unwrap();

    assert_eq!(result.status, CoverageStatus::NotCovered);
    assert!(result.closest_territory.is_none());
    assert_eq!(result.total_territories, 1);
    assert_eq!(result.active_territories, 0);
    assert_eq!(result.territories_checked, 0);
}

#[tokio::test]
async fn failed_address_lookup_skips_territory_fetch() {
    let territories = StaticTerritories::new(vec![Territory::new("bil", "Billings")]);
    let checker = CoverageChecker::new(billings_geocoder(), &territories);

    let err = checker.check("nowhere at all").await.unwrap_err();

    assert!(matches!(
        err,
        CoverageError::Geocoding(GeocodingError::NoResults { .. })
    ));
    assert_eq!(territories.fetch_count(), 0);
}

#[tokio::test]
async fn territory_fetch_failure_is_fatal() {
    let territories = StaticTerritories::failing(502, "bad gateway");
    let checker = CoverageChecker::new(billings_geocoder(), &territories);

    let err = checker.check("2800 1st Ave N, Billings, MT").await.unwrap_err();
    assert!(matches!(err, CoverageError::UpstreamApi { status: 502, .. }));
}

#[tokio::test]
async fn three_raw_points_take_priority_over_square() {
    let g = StaticGeocoder::new()
        .with("62701", 39.80, -89.65)
        .with("62704", 39.77, -89.69)
        .with("Springfield", 39.78, -89.60);
    let t = Territory::new("spr", "Springfield")
        .with_zip_codes(["62701", "62704"])
        .with_cities(["Springfield"]);

    let boundary = BoundarySynthesizer::new(&g).synthesize(&t).await;

    assert_eq!(boundary.source, BoundarySource::Geocoded);
    assert_eq!(boundary.vertex_count(), 3);
    assert_eq!(g.calls(), vec!["62701", "62704", "springfield"]);
}

#[tokio::test]
async fn square_side_is_three_tenths_of_a_degree() {
    let g = StaticGeocoder::new().with("Helena, MT", 46.59, -112.04);
    let t = Territory::new("hel", "Helena")
        .with_zip_codes(["bogus"])
        .with_cities(["Helena"])
        .with_states(["MT"]);

    let boundary = BoundarySynthesizer::new(&g).synthesize(&t).await;
    let v = boundary.vertices.unwrap();

    assert_eq!(v.len(), 4);
    assert!((v[1].longitude() - v[0].longitude() - 0.3).abs() < 1e-9);
    assert!((v[2].latitude() - v[1].latitude() - 0.3).abs() < 1e-9);
    let center = boundary.center.unwrap();
    assert!((center.latitude() - 46.59).abs() < 1e-9);
}

#[tokio::test]
async fn adjacency_uses_radius_and_validates_it() {
    let g = billings_geocoder().with("Laurel, MT", 45.67, -108.77);
    let territories = StaticTerritories::new(vec![
        Territory::new("lau", "Laurel").with_cities(["Laurel"]).with_states(["MT"]),
        Territory::new("bil", "Billings").with_zip_codes(["59102"]),
    ]);
    let checker = CoverageChecker::new(g, &territories);

    let (_, report) = checker
        .adjacent("2800 1st Ave N, Billings, MT", 50.0)
        .await
        .unwrap();
    let ids: Vec<_> = report.adjacent.iter().map(|a| a.territory.id.as_str()).collect();
    assert_eq!(ids, vec!["bil", "lau"]);

    let err = checker
        .adjacent("2800 1st Ave N, Billings, MT", 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, CoverageError::InvalidRadius { .. }));
    assert_eq!(territories.fetch_count(), 1);
}
