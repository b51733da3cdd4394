/// Build the description prompt for a task.
pub fn build_prompt(task_title: &str, project_title: Option<&str>) -> String {
    let mut prompt = format!(
        "Generate a detailed, professional task description for an intern management system. \nTask Title: \"{task_title}\""
    );

    if let Some(project) = project_title.filter(|p| !p.trim().is_empty()) {
        prompt.push_str(&format!("\nProject: \"{project}\""));
    }

    prompt.push_str(
        "\n\nRequirements:
- The description should be clear and actionable
- Include specific deliverables or outcomes expected
- Mention any important considerations or constraints
- Keep it professional but concise (2-4 sentences)
- Focus on what the intern needs to accomplish

Generate only the task description, no additional text or formatting.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_project_when_given() {
        let prompt = build_prompt("Write README", Some("Onboarding"));
        assert!(prompt.contains("Task Title: \"Write README\"\nProject: \"Onboarding\""));
        assert!(prompt.ends_with("no additional text or formatting."));
    }

    #[test]
    fn omits_project_line_without_project() {
        let prompt = build_prompt("Write README", None);
        assert!(!prompt.contains("Project:"));
        assert!(prompt.contains("Requirements:"));
    }
}
