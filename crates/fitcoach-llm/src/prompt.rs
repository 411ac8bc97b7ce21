//! Prompt construction for the coaching model.
//!
//! The model only ever sees a profile-augmented prompt; raw user questions
//! are never sent without the coaching instructions.

use fitcoach_types::FitnessProfile;

/// Wrap a user question in the coaching instructions and profile context.
pub fn build_coach_prompt(profile: &FitnessProfile, question: &str) -> String {
    format!(
        "\nYou are a professional fitness and health expert. The user's profile:\n\
         - Age: {age}\n\
         - Sex: {sex}\n\
         - Weight: {weight} kg\n\n\
         Only answer fitness, health, nutrition, or workout-related questions. \
         If the question is not related to fitness, politely redirect them to fitness topics.\n\n\
         User question: {question}\n\n\
         Provide helpful, personalized advice based on their profile. Be encouraging and motivational!\n",
        age = profile.age,
        sex = profile.sex.as_str(),
        weight = profile.weight_kg,
        question = question,
    )
}

/// Greeting seeded as the first AI message of a fresh thread.
pub fn welcome_message(profile: &FitnessProfile) -> String {
    format!(
        "Welcome to your AI Fitness Assistant! I'm here to help you with personalized \
         fitness advice based on your profile:\n\n\
         Age: {age}\nSex: {sex}\nWeight: {weight}kg\n\n\
         Feel free to ask me anything about fitness, workouts, nutrition, or health! \
         How can I help you today?",
        age = profile.age,
        sex = profile.sex.as_str(),
        weight = profile.weight_kg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_types::Sex;

    fn profile() -> FitnessProfile {
        FitnessProfile {
            age: 28,
            sex: Sex::Female,
            weight_kg: 62.0,
        }
    }

    #[test]
    fn prompt_embeds_profile_and_question() {
        let prompt = build_coach_prompt(&profile(), "How do I improve my squat?");
        assert!(prompt.contains("Age: 28"));
        assert!(prompt.contains("Sex: Female"));
        assert!(prompt.contains("Weight: 62 kg"));
        assert!(prompt.contains("User question: How do I improve my squat?"));
    }

    #[test]
    fn welcome_mentions_profile() {
        let welcome = welcome_message(&profile());
        assert!(welcome.contains("Age: 28"));
        assert!(welcome.contains("Weight: 62kg"));
    }
}
