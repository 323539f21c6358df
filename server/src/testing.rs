//! Shared fixtures for the server tests.

use std::path::Path;

use serde_json::json;

use dxlookup_contracts::disease::DiseaseInfo;
use dxlookup_core::traits::InfoSource;

pub const DESCRIPTION_CSV: &str = "\
Disease,Description
Fungal infection,Fungal infection is a common skin condition caused by fungi.
Allergy,Allergy is an immune system reaction to a substance in the environment.
";

pub const PRECAUTIONS_CSV: &str = "\
,Disease,Precaution_1,Precaution_2,Precaution_3,Precaution_4
0,Fungal infection,bath twice,use detol or neem in bathing water,keep infected area dry,use clean cloths
1,Allergy,apply calamine,cover area with bandage,,use ice to compress itching
";

pub const MEDICATIONS_CSV: &str = "\
Disease,Medication
Fungal infection,\"['Antifungal Cream', 'Fluconazole']\"
Ghost,['Nothing']
";

pub const DIETS_CSV: &str = "\
Disease,Diet
Fungal infection,\"['Antifungal Diet', 'Probiotics']\"
";

pub const WORKOUT_CSV: &str = "\
Unnamed: 0,disease,workout
0,Fungal infection,Avoid sugary foods
1,Fungal infection,Consume probiotics
2,Fungal infection,NaN
";

/// Write the five fixture tables under `dir` with their default names.
pub fn write_datasets(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    for (file, contents) in [
        ("description.csv", DESCRIPTION_CSV),
        ("precautions_df.csv", PRECAUTIONS_CSV),
        ("medications.csv", MEDICATIONS_CSV),
        ("diets.csv", DIETS_CSV),
        ("workout_df.csv", WORKOUT_CSV),
    ] {
        std::fs::write(dir.join(file), contents).unwrap();
    }
}

/// One-vs-rest artifact over the full vocabulary: itching, skin_rash and
/// nodal_skin_eruptions point to label 15 (Fungal infection), anything else
/// to label 4 (Allergy).
pub fn skin_artifact() -> String {
    let mut fungal = vec![0.0; 132];
    fungal[0] = 1.0;
    fungal[1] = 1.0;
    fungal[2] = 1.0;
    json!({
        "model_name": "skin-fixture",
        "n_features": 132,
        "classes": [15, 4],
        "strategy": "one_vs_rest",
        "coef": [fungal, vec![0.0; 132]],
        "intercept": [0.0, 0.5]
    })
    .to_string()
}

/// Valid artifact whose width does not match the built-in vocabulary.
pub fn narrow_artifact() -> String {
    json!({
        "model_name": "narrow",
        "n_features": 3,
        "classes": [15, 4],
        "strategy": "one_vs_rest",
        "coef": [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]],
        "intercept": [0.0, 0.5]
    })
    .to_string()
}

pub struct NoInfo;

impl InfoSource for NoInfo {
    fn resolve(&self, _disease: &str) -> DiseaseInfo {
        DiseaseInfo::default()
    }
}
