use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// The fitness profile a user fills in before chatting. Used to personalize
/// coach prompts; never persisted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessProfile {
    pub age: u32,
    pub sex: Sex,
    pub weight_kg: f64,
}

/// BMI value with its interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAnalysis {
    pub bmi: f64,
    pub category: String,
    pub description: String,
    pub healthy_range: String,
}

/// BMI = weight (kg) / height (m)^2.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

pub fn bmi_description(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "You may want to gain some weight. Consult with a healthcare provider for personalized advice."
    } else if bmi < 25.0 {
        "Great! Your weight is in the healthy range. Keep up the good work with regular exercise and balanced nutrition."
    } else if bmi < 30.0 {
        "Consider incorporating more physical activity and a balanced diet to reach a healthier weight."
    } else {
        "It may be beneficial to work with healthcare professionals to develop a comprehensive weight management plan."
    }
}

/// Weight range (kg) that keeps BMI between 18.5 and 24.9 at this height.
pub fn healthy_weight_range(height_cm: f64) -> String {
    let height_m = height_cm / 100.0;
    let min = (18.5 * height_m * height_m).round() as i64;
    let max = (24.9 * height_m * height_m).round() as i64;
    format!("{} - {} kg", min, max)
}

pub fn bmi_analysis(weight_kg: f64, height_cm: f64) -> BmiAnalysis {
    let bmi = calculate_bmi(weight_kg, height_cm);
    BmiAnalysis {
        bmi: (bmi * 10.0).round() / 10.0,
        category: bmi_category(bmi).to_string(),
        description: bmi_description(bmi).to_string(),
        healthy_range: healthy_weight_range(height_cm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_of_70kg_175cm_is_normal() {
        let analysis = bmi_analysis(70.0, 175.0);
        assert_eq!(analysis.bmi, 22.9);
        assert_eq!(analysis.category, "Normal weight");
        assert_eq!(analysis.healthy_range, "57 - 76 kg");
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(bmi_category(18.4), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal weight");
        assert_eq!(bmi_category(24.9), "Normal weight");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese");
    }
}
