//! Shared fixtures for integration tests

#![allow(dead_code)]

use alumni::prelude::*;

/// The eight-record sample roster
pub fn sample_alumni() -> Vec<Alumnus> {
    vec![
        Alumnus::new(1, "Samantha Carter", 2015, "Stargate Command", "Colorado Springs", "Aerospace & Defense"),
        Alumnus::new(2, "John Sheppard", 2004, "Atlantis Expedition", "Pegasus Galaxy", "Exploration"),
        Alumnus::new(3, "Daniel Jackson", 1997, "Stargate Command", "Colorado Springs", "Research"),
        Alumnus::new(4, "Teal'c", 2007, "Free Jaffa Nation", "Dakara", "Government"),
        Alumnus::new(5, "Rodney McKay", 2004, "Atlantis Expedition", "Pegasus Galaxy", "Research"),
        Alumnus::new(6, "Vala Mal Doran", 2006, "Stargate Command", "Colorado Springs", "Security"),
        Alumnus::new(7, "George Hammond", 1970, "Stargate Command", "Washington D.C.", "Aerospace & Defense"),
        Alumnus::new(8, "Ronon Dex", 2005, "Atlantis Expedition", "Pegasus Galaxy", "Security"),
    ]
}

pub fn sample_roster() -> Roster {
    Roster::new(sample_alumni()).expect("sample ids are unique")
}

pub fn ids(records: &[Alumnus]) -> Vec<u32> {
    records.iter().map(|a| a.id).collect()
}
