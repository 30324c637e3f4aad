//! Shared fixtures for the page pipeline tests.

use pagebuilder_core::{SortValue, Sortable};

/// Postal address with an optional city.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: Option<String>,
}

impl Sortable for Address {
    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        match name {
            "street" => Some(SortValue::of(&self.street)),
            "city" => Some(SortValue::of(&self.city)),
            _ => None,
        }
    }
}

/// Person living at an address.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub address: Address,
}

impl Sortable for Person {
    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        match name {
            "firstName" => Some(SortValue::of(&self.first_name)),
            "lastName" => Some(SortValue::of(&self.last_name)),
            "age" => Some(SortValue::of(&self.age)),
            "address" => Some(SortValue::object(&self.address)),
            _ => None,
        }
    }
}

/// View of a person as shown in a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRow {
    pub display_name: String,
    pub city: String,
}

impl Sortable for PersonRow {
    fn property(&self, name: &str) -> Option<SortValue<'_>> {
        match name {
            "displayName" => Some(SortValue::of(&self.display_name)),
            "city" => Some(SortValue::of(&self.city)),
            _ => None,
        }
    }
}

impl From<Person> for PersonRow {
    fn from(person: Person) -> Self {
        Self {
            display_name: format!("{}, {}", person.last_name, person.first_name),
            city: person.address.city.unwrap_or_default(),
        }
    }
}

pub fn address(city: &str) -> Address {
    Address {
        street: format!("{city} Street 1"),
        city: Some(city.to_string()),
    }
}

pub fn addresses() -> Vec<Address> {
    ["Paris", "London", "Berlin", "New York"].into_iter().map(address).collect()
}

pub fn person(first_name: &str, last_name: &str, age: u32, city: Option<&str>) -> Person {
    Person {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age,
        address: Address {
            street: "Main Street 1".to_string(),
            city: city.map(ToString::to_string),
        },
    }
}

pub fn people() -> Vec<Person> {
    vec![
        person("Anna", "Meier", 34, Some("zurich")),
        person("Ben", "Adams", 27, Some("Berlin")),
        person("Carla", "meier", 41, None),
        person("David", "Baker", 19, Some("amsterdam")),
        person("Eva", "Adams", 52, Some("Berlin")),
    ]
}
