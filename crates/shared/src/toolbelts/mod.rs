pub mod calculator;
pub mod text;
pub mod weather;

use crate::schemas::Tool;

/// Every built-in tool, in catalogue order. The weather tool needs network
/// access and can be left out.
pub fn get_tools(include_weather: bool) -> Vec<Tool> {
    let mut tools: Vec<Tool> = calculator::TOOL_ENTRIES
        .iter()
        .chain(text::TOOL_ENTRIES)
        .copied()
        .collect();
    if include_weather {
        tools.extend_from_slice(weather::TOOL_ENTRIES);
    }
    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tools_in_catalogue_order() {
        let names: Vec<_> = get_tools(true).iter().map(|tool| tool.name).collect();
        assert_eq!(
            names,
            vec!["basic_calculator", "reverse_string", "get_bangkok_weather"]
        );
    }

    #[test]
    fn weather_can_be_left_out() {
        let names: Vec<_> = get_tools(false).iter().map(|tool| tool.name).collect();
        assert_eq!(names, vec!["basic_calculator", "reverse_string"]);
    }
}
