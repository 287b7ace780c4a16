use optkit::{Opt, Options, Value};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<DispatchReport>,
    pub values: Vec<OptionReport>,
    pub remainder: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionReport {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: &'static str,
    pub value: serde_json::Value,
    /// Whether the value came from input rather than the default.
    pub set: bool,
}

impl OptionReport {
    fn from_opt(opt: &Opt) -> Self {
        Self {
            name: opt.display_name(),
            var_type: opt.var_type().as_str(),
            value: json_value(opt.resolved()),
            set: opt.is_set(),
        }
    }
}

pub fn build_report(opt: &Options, command: Option<DispatchReport>) -> ParseReport {
    ParseReport {
        outcome: if command.is_some() { "dispatched" } else { "done" },
        command,
        values: opt.options().map(OptionReport::from_opt).collect(),
        remainder: opt.remainder().to_vec(),
    }
}

fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::from(*b),
        Value::String(s) => serde_json::Value::from(s.as_str()),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(x) => serde_json::Value::from(*x),
        Value::Strings(v) => serde_json::Value::from(v.clone()),
    }
}

pub fn render_human(report: &ParseReport) -> String {
    let mut out = String::new();
    if let Some(cmd) = &report.command {
        out.push_str(&format!("Dispatched: {} {}\n", cmd.name, cmd.args.join(" ")));
    }
    let width = report.values.iter().map(|v| v.name.chars().count()).max().unwrap_or(0);
    for v in &report.values {
        let marker = if v.set { "" } else { " (default)" };
        out.push_str(&format!(
            "  {:width$}  {} = {}{}\n",
            v.name,
            v.var_type,
            v.value,
            marker,
            width = width
        ));
    }
    if !report.remainder.is_empty() {
        out.push_str(&format!("Remainder: {}\n", report.remainder.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_marks_defaults_and_remainder() {
        let mut opt = Options::new();
        opt.register("", "p", "port", "", Value::Int(3000), false)
            .unwrap();
        opt.register("", "v", "verbose", "", false, false).unwrap();
        opt.parse_args(&["-v", "extra"]).unwrap();

        let report = build_report(&opt, None);
        assert_eq!(report.outcome, "done");
        assert_eq!(report.remainder, ["extra"]);
        assert_eq!(report.values[0].name, "--port");
        assert_eq!(report.values[0].value, serde_json::json!(3000));
        assert!(!report.values[0].set);
        assert!(report.values[1].set);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["values"][1]["type"], "bool");
        assert!(json.get("command").is_none());
    }

    #[test]
    fn human_report_pads_names_by_characters() {
        let mut opt = Options::new();
        opt.register("", "g", "größe", "", Value::Int(0), false)
            .unwrap();
        opt.register("", "n", "name", "", "", false).unwrap();
        opt.parse_args(&["-g", "2", "rest"]).unwrap();

        let text = render_human(&build_report(&opt, None));
        assert_eq!(
            text,
            "  --größe  int = 2\n  --name   string = \"\" (default)\nRemainder: rest\n"
        );
    }
}
