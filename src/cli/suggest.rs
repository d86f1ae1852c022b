use super::ui;
use crate::core::suggestion::{
    ContentIdea, CourseModule, SuggestionProvider, generate_content_ideas, generate_course_outline,
};
use anyhow::Result;

pub fn ideas_view(topic: &str, ideas: &[ContentIdea]) -> String {
    if ideas.is_empty() {
        return format!("No suggestions for \"{topic}\" right now.");
    }
    let mut output = format!(
        "{}\n",
        ui::style_text(&format!("Blog ideas: {topic}"), ui::StyleType::Heading)
    );
    for (i, idea) in ideas.iter().enumerate() {
        output.push_str(&format!(
            "\n{}. {}\n   {}",
            i + 1,
            ui::style_text(&idea.title, ui::StyleType::Label),
            idea.excerpt
        ));
    }
    output
}

pub fn outline_view(course_name: &str, modules: &[CourseModule]) -> String {
    if modules.is_empty() {
        return format!("No outline for \"{course_name}\" right now.");
    }
    let mut output = format!(
        "{}\n",
        ui::style_text(&format!("Course outline: {course_name}"), ui::StyleType::Heading)
    );
    for (i, module) in modules.iter().enumerate() {
        output.push_str(&format!(
            "\nModule {}: {}",
            i + 1,
            ui::style_text(&module.module_name, ui::StyleType::Label)
        ));
        for topic in &module.topics {
            output.push_str(&format!("\n  • {topic}"));
        }
    }
    output
}

pub async fn ideas(provider: &(dyn SuggestionProvider + Send + Sync), topic: &str) -> Result<()> {
    let pb = ui::new_spinner("Generating ideas...");
    let ideas = generate_content_ideas(provider, topic).await;
    pb.finish_and_clear();
    println!("{}", ideas_view(topic, &ideas));
    Ok(())
}

pub async fn outline(
    provider: &(dyn SuggestionProvider + Send + Sync),
    course_name: &str,
) -> Result<()> {
    let pb = ui::new_spinner("Drafting outline...");
    let modules = generate_course_outline(provider, course_name).await;
    pb.finish_and_clear();
    println!("{}", outline_view(course_name, &modules));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideas_view() {
        let ideas = vec![ContentIdea {
            title: "Slow Craft".to_string(),
            excerpt: "Why handmade lasts.".to_string(),
        }];
        let view = ideas_view("craft", &ideas);
        assert!(view.contains("1. "));
        assert!(view.contains("Why handmade lasts."));
        assert_eq!(ideas_view("craft", &[]), "No suggestions for \"craft\" right now.");
    }

    #[test]
    fn test_outline_view() {
        let modules = vec![CourseModule {
            module_name: "Foundations".to_string(),
            topics: vec!["Tools".to_string(), "Safety".to_string()],
        }];
        let view = outline_view("Pottery", &modules);
        assert!(view.contains("Module 1: "));
        assert!(view.contains("  • Safety"));
    }
}
