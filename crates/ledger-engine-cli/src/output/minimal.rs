use serde_json::Value;

/// Headline field of each command, most specific first.
const HEADLINE_KEYS: [&str; 9] = [
    "interest_saved",
    "monthly_payment",
    "payoff_months",
    "drift",
    "utilization_pct",
    "net_worth",
    "ending_balance",
    "total_credit_utilization",
    "principal",
];

/// Print just the headline value of a result, for use in shell pipelines.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result else {
        println!("{}", format_minimal(result));
        return;
    };

    let headline = HEADLINE_KEYS
        .iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null()));

    match headline {
        // Portfolio summaries nest the figure one level down
        Some(Value::Object(inner)) if inner.contains_key("net_worth") => {
            println!("{}", format_minimal(&inner["net_worth"]));
        }
        Some(val) => println!("{}", format_minimal(val)),
        None => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
