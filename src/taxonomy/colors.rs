/// GitHub's published display color for a language, with a neutral gray
/// fallback for anything unlisted.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "Python" => "#3572A5",
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Java" => "#b07219",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#178600",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Dart" => "#00B4AB",
        "Scala" => "#c22d40",
        "R" => "#198CE7",
        "Shell" => "#89e051",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Vue" => "#41b883",
        "Svelte" => "#ff3e00",
        "Jupyter Notebook" => "#DA5B0B",
        _ => "#858585",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_languages() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("Python"), "#3572A5");
        assert_eq!(language_color("Brainfuck"), "#858585");
    }
}
