/// Given names drawn by both generation strategies.
pub const GIVEN_NAMES: &[&str] = &[
    "James", "Emma", "Michael", "Sophia", "David", "Olivia", "Robert", "Ava", "William",
    "Isabella", "Richard", "Mia", "Joseph", "Charlotte", "Thomas", "Amelia", "Daniel", "Harper",
    "Matthew", "Evelyn", "Thabo", "Lerato", "Zukiswa",
];

/// Family names drawn by both generation strategies.
pub const FAMILY_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore",
    "Jackson", "Martin", "Lee", "Ndlovu", "Mkhize", "Singh", "Chao",
];

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 85;

/// Upper bound accepted for a single generation request.
pub const MAX_RECORDS: u32 = 1_000_000;

/// Requests at or below this size use random sampling; larger ones enumerate.
pub const SAMPLING_THRESHOLD: usize = 100;

pub const CSV_FILENAME: &str = "output.csv";
