//! Label list formatting

use crate::models::LabelList;

/// Format the label list with positions and colors
pub fn format_label_list(labels: &LabelList) -> String {
    if labels.is_empty() {
        return "No labels defined.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:>3}  {:30} {:8} {}\n", "#", "Name", "Color", "ID"));
    for (i, label) in labels.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:30} {:8} {}\n",
            i + 1,
            label.name,
            label.color,
            label.id
        ));
    }
    output
}
