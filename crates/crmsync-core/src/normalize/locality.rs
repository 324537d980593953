use std::collections::HashMap;

const IRISH_CITIES: [&str; 4] = ["Waterford", "Limerick", "Dublin", "Cork"];
const ENGLISH_CITIES: [&str; 5] = ["Plymouth", "Milton Keynes", "Oxford", "London", "Winchester"];

/// Result of splitting a locality. Both parts are empty for unknown input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locality {
    pub country: String,
    pub city: String,
}

impl Locality {
    fn new(country: &str, city: &str) -> Self {
        Self {
            country: country.to_string(),
            city: city.to_string(),
        }
    }
}

/// Known locality names. A city maps to its country; a country-level name maps to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalityTable {
    entries: HashMap<String, Option<String>>,
}

impl Default for LocalityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocalityTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for city in IRISH_CITIES {
            table.insert_city(city, "Ireland");
        }
        for city in ENGLISH_CITIES {
            table.insert_city(city, "England");
        }
        table
    }

    /// Registers `city` under `country`; the country becomes a known country-level name.
    pub fn insert_city(&mut self, city: &str, country: &str) {
        let city = city.trim();
        let country = country.trim();
        if city.is_empty() || country.is_empty() {
            return;
        }
        self.entries.entry(country.to_string()).or_insert(None);
        self.entries
            .insert(city.to_string(), Some(country.to_string()));
    }

    pub fn insert_country(&mut self, country: &str) {
        let country = country.trim();
        if country.is_empty() {
            return;
        }
        self.entries.insert(country.to_string(), None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn split(&self, locality: Option<&str>) -> Locality {
        let Some(locality) = locality.map(str::trim).filter(|value| !value.is_empty()) else {
            return Locality::default();
        };
        match self.entries.get(locality) {
            Some(Some(country)) => Locality::new(country, locality),
            Some(None) => Locality::new(locality, ""),
            None => Locality::default(),
        }
    }
}
