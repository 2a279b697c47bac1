//! Smoke test for a running Santia API.
//!
//! Exercises health, consent rejection, intake creation and listing, and
//! the status check endpoints, then prints a summary. Exits non-zero if
//! any check fails.
//!
//! Usage:
//!   SANTIA_API_URL=http://localhost:8001 \
//!   cargo run -p santia-api --example api_smoke

use serde_json::{json, Value};

struct Report {
    run: usize,
    passed: usize,
}

impl Report {
    fn record(&mut self, name: &str, outcome: Result<String, String>) -> bool {
        self.run += 1;
        match outcome {
            Ok(detail) => {
                self.passed += 1;
                println!("  ✅ {name}: {detail}");
                true
            }
            Err(detail) => {
                println!("  ❌ {name}: {detail}");
                false
            }
        }
    }
}

fn intake_payload(consent: bool) -> Value {
    json!({
        "category": "sante-sexuelle",
        "symptoms": "Douleurs abdominales depuis 3 jours",
        "duration": "1-4-semaines",
        "history": "Aucun antécédent particulier",
        "name": "Jean Dupont",
        "age": 30,
        "gender": "homme",
        "phone": "+237600123456",
        "email": "jean.dupont@example.com",
        "city": "Douala",
        "consent": consent
    })
}

fn get_json(url: &str) -> Result<Value, String> {
    let mut resp = ureq::get(url).call().map_err(|e| e.to_string())?;
    resp.body_mut().read_json::<Value>().map_err(|e| e.to_string())
}

fn post_json(url: &str, body: &Value) -> Result<Value, String> {
    let mut resp = ureq::post(url).send_json(body).map_err(|e| e.to_string())?;
    resp.body_mut().read_json::<Value>().map_err(|e| e.to_string())
}

fn check_health(base: &str) -> Result<String, String> {
    let body = get_json(&format!("{base}/api/"))?;
    Ok(format!("response: {body}"))
}

fn check_consent_rejected(base: &str) -> Result<String, String> {
    match ureq::post(&format!("{base}/api/intake")).send_json(intake_payload(false)) {
        Err(ureq::Error::StatusCode(400)) => Ok("400 as expected".to_string()),
        Err(e) => Err(format!("expected 400, got {e}")),
        Ok(resp) => Err(format!("expected 400, got {}", resp.status())),
    }
}

fn check_intake_created(base: &str) -> Result<String, String> {
    let body = post_json(&format!("{base}/api/intake"), &intake_payload(true))?;

    let missing: Vec<&str> = ["id", "category", "symptoms", "name", "email", "status", "created_at"]
        .into_iter()
        .filter(|field| body.get(*field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing fields in response: {missing:?}"));
    }
    if body["status"] != "pending" {
        return Err(format!("expected status pending, got {}", body["status"]));
    }

    Ok(format!("intake created with id {}", body["id"]))
}

fn check_intakes_listed(base: &str) -> Result<String, String> {
    match get_json(&format!("{base}/api/intakes"))? {
        Value::Array(items) => Ok(format!("retrieved {} intakes", items.len())),
        other => Err(format!("response is not a list: {other}")),
    }
}

fn check_status_round_trip(base: &str) -> Result<String, String> {
    let created = post_json(
        &format!("{base}/api/status"),
        &json!({"client_name": "smoke_client"}),
    )?;
    let listed = get_json(&format!("{base}/api/status"))?;

    let found = listed
        .as_array()
        .is_some_and(|items| items.iter().any(|item| item["id"] == created["id"]));
    if found {
        Ok(format!("status check {} listed", created["id"]))
    } else {
        Err(format!("status check {} missing from listing", created["id"]))
    }
}

fn main() -> eyre::Result<()> {
    let base = std::env::var("SANTIA_API_URL").unwrap_or_else(|_| "http://localhost:8001".to_string());
    let base = base.trim_end_matches('/');

    println!("Santia API smoke test: {base}");
    println!();

    let mut report = Report { run: 0, passed: 0 };

    if !report.record("API health", check_health(base)) {
        eyre::bail!("API is not reachable at {base}");
    }
    report.record("Intake rejected without consent", check_consent_rejected(base));
    report.record("Intake created", check_intake_created(base));
    report.record("Intakes listed", check_intakes_listed(base));
    report.record("Status check round trip", check_status_round_trip(base));

    println!();
    println!("{}/{} checks passed", report.passed, report.run);

    if report.passed != report.run {
        eyre::bail!("{} check(s) failed", report.run - report.passed);
    }
    Ok(())
}
