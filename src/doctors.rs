//! Doctor directory
//! Fixed seed list, immutable for the life of the process

use crate::models::Doctor;

const SEED: &[(i64, &str, &str)] = &[
    (1, "Dr. Alice Smith", "Cardiology"),
    (2, "Dr. Bob Johnson", "Pediatrics"),
    (3, "Dr. Carol Williams", "Mental Health"),
];

pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// The built-in directory
    pub fn seeded() -> Self {
        Self::new(
            SEED.iter()
                .map(|&(id, name, specialty)| Doctor {
                    id,
                    name: name.to_string(),
                    specialty: specialty.to_string(),
                })
                .collect(),
        )
    }

    pub fn list(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn get(&self, id: i64) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}
