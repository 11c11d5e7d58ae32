use route_map::libraries::geo_distance::{
    great_circle_distance, travel_time, DEFAULT_SPEED_METERS_PER_SECOND,
};
use route_map::models::Coordinate;
use route_map::services::point_selection::SearchError;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: route_distance <start lat,lon> <goal lat,lon> [speed m/s]");
        std::process::exit(2);
    }

    for (text, error) in [
        (&args[0], SearchError::MissingStart),
        (&args[1], SearchError::MissingGoal),
    ] {
        if !Coordinate::is_well_formed(text) {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }

    let (Ok(start), Ok(goal)) = (Coordinate::parse(&args[0]), Coordinate::parse(&args[1])) else {
        std::process::exit(1);
    };

    let speed = match args.get(2).map(|s| s.parse::<f64>()) {
        None => DEFAULT_SPEED_METERS_PER_SECOND,
        Some(Ok(speed)) if speed > 0.0 => speed,
        Some(_) => {
            eprintln!("Speed must be a positive number, got '{}'", args[2]);
            std::process::exit(2);
        }
    };

    let distance = great_circle_distance(&start, &goal);
    let time = travel_time(distance, speed);

    println!("{} m, {} min.", distance, time);
}
