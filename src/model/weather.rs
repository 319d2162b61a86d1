/// Canned weather reading for a known city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityWeather {
    pub city: &'static str,
    pub temperature: i32,
}

/// Looks up the fixed reading for `city_id`. Unknown ids yield `None`.
pub fn city_weather(city_id: i64) -> Option<CityWeather> {
    match city_id {
        1 => Some(CityWeather {
            city: "New York",
            temperature: 25,
        }),
        2 => Some(CityWeather {
            city: "Cairo",
            temperature: 40,
        }),
        _ => None,
    }
}
