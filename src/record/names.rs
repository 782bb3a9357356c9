//! Name tables for record generation.
//!
//! `NameSource` is the seam that lets tests supply deterministic names
//! while production code draws from the built-in tables.

use rand::Rng;

/// Supplies names for generated records
pub trait NameSource: Send + Sync {
    fn first_name(&self) -> String;
    fn last_name(&self) -> String;
}

/// Draws uniformly from the built-in name tables
#[derive(Debug, Default)]
pub struct BuiltinNames;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael",
    "Linda", "David", "Elizabeth", "William", "Barbara", "Richard", "Susan",
    "Joseph", "Jessica", "Thomas", "Sarah", "Charles", "Karen", "Christopher",
    "Lisa", "Daniel", "Nancy", "Matthew", "Betty", "Anthony", "Sandra",
    "Mark", "Margaret", "Donald", "Ashley", "Steven", "Kimberly", "Andrew",
    "Emily", "Paul", "Donna", "Joshua", "Michelle", "Kenneth", "Carol",
    "Kevin", "Amanda", "Brian", "Dorothy", "George", "Melissa",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
    "Davis", "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez",
    "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin",
    "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez", "Clark",
    "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King",
    "Wright", "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green",
    "Adams", "Nelson", "Baker", "Hall", "Rivera", "Campbell", "Mitchell",
];

impl NameSource for BuiltinNames {
    fn first_name(&self) -> String {
        let mut rng = rand::thread_rng();
        FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())].to_string()
    }

    fn last_name(&self) -> String {
        let mut rng = rand::thread_rng();
        LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())].to_string()
    }
}
