use num_traits::Float;


/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance between two lat/lon points, in meters
/// https://en.wikipedia.org/wiki/Haversine_formula
/// Coordinates are in degrees. The result is an underestimate of any road
/// distance between the points, so it is admissible as an A* heuristic,
/// and it satisfies the triangle inequality (consistent)
pub fn haversine<T>(lat1: T, lon1: T, lat2: T, lon2: T) -> T
where
    T: Float,
    {
    let radius = T::from(EARTH_RADIUS_M).unwrap(); // float-to-float, cannot fail

    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    // Differences in coordinates
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let two = T::from(2.0).unwrap();
    let half = T::from(0.5).unwrap();

    // Haversine formula
    let a = (dlat * half).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon * half).sin().powi(2);
    let c = two * a.sqrt().atan2((T::one() - a).sqrt());

    radius * c
}
