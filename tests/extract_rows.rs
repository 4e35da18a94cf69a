// tests/extract_rows.rs
use serde_json::{json, Value};

use sisal_archive::config::options::{ErrorPolicy, ExtractOptions, ModelSelector};
use sisal_archive::specs::{self, RawMatchday};
use sisal_archive::{scrape, ExtractError, Row};

fn matchday(giornata: u32, minute: u32, models: Value) -> Value {
    json!({
        "giornata": giornata,
        "dataPrimoEvento": format!("2024-05-01T10:{minute:02}:00"),
        "risultatoModelloScommessaCampionatoMap": { "1": models }
    })
}

fn model(label: &str, events: &[(&str, &[&str])]) -> Value {
    let events: Vec<Value> = events
        .iter()
        .map(|(desc, outcomes)| {
            let res: Vec<Value> = outcomes
                .iter()
                .map(|o| json!({ "risultato": o, "descrizioneScommessa": label, "quoteComb": 180 }))
                .collect();
            json!({ "descrizioneAvventimento": desc, "risultatoScommessaUfficialeList": res })
        })
        .collect();
    json!({ "modelloScommessa": label, "eventiScommessaList": events })
}

fn parse(v: Value) -> Vec<RawMatchday> {
    specs::parse_payload(&v.to_string()).unwrap()
}

fn sample() -> Vec<RawMatchday> {
    parse(json!([
        matchday(5, 0, json!([
            model("Goal/No Goal", &[("Roma - Lazio", &["Goal"]), ("Inter - Milan", &["No Goal"])]),
            model("Esito Finale", &[("Roma - Lazio", &["1", "1X"])]),
        ])),
        matchday(6, 3, json!([
            model("Goal/No Goal", &[("Lazio - Inter", &["Goal"])]),
            model("Esito Finale", &[("Lazio - Inter", &["2"]), ("Milan - Roma", &[])]),
        ])),
        matchday(7, 6, json!([])),
    ]))
}

fn key(r: &Row) -> String {
    format!("{}|{}|{}|{}|{:?}", r.matchday, r.home, r.away, r.outcome, r.market)
}

#[test]
fn row_count_equals_outcomes_under_matching_models() {
    let all = scrape::extract(&sample(), &ExtractOptions::default()).unwrap();
    assert_eq!(all.rows.len(), 6);

    let opts = ExtractOptions { model: ModelSelector::Label("Goal/No Goal".into()), ..Default::default() };
    let goal = scrape::extract(&sample(), &opts).unwrap();
    assert_eq!(goal.rows.len(), 3);
    assert!(goal.rows.iter().all(|r| r.market.as_deref() == Some("Goal/No Goal")));
}

#[test]
fn extraction_ignores_input_order() {
    let forward = scrape::extract(&sample(), &ExtractOptions::default()).unwrap().rows;

    let mut shuffled = sample();
    shuffled.reverse();
    shuffled.rotate_left(1);
    let backward = scrape::extract(&shuffled, &ExtractOptions::default()).unwrap().rows;

    let mut a: Vec<String> = forward.iter().map(key).collect();
    let mut b: Vec<String> = backward.iter().map(key).collect();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[test]
fn three_matchdays_one_row_each() {
    let mds = parse(json!([
        matchday(3, 0, json!([model("Goal/No Goal", &[("A - B", &["Goal"])])])),
        matchday(2, 3, json!([model("Goal/No Goal", &[("A - B", &["Goal"])])])),
        matchday(1, 6, json!([model("Goal/No Goal", &[("A - B", &["Goal"])])])),
    ]));
    let out = scrape::extract(&mds, &ExtractOptions::default()).unwrap();
    assert_eq!(out.rows.iter().map(|r| r.matchday).collect::<Vec<_>>(), vec![3, 2, 1]);
    assert!(out.rows.iter().all(|r| r.home == "A" && r.away == "B" && r.outcome == "Goal"));
}

#[test]
fn event_without_separator_fails_strictly() {
    let mds = parse(json!([
        matchday(4, 0, json!([model("Goal/No Goal", &[("A - B", &["Goal"]), ("TeamAOnly", &["Goal", "No Goal"])])])),
    ]));

    let strict = ExtractOptions { on_error: ErrorPolicy::Abort, ..Default::default() };
    let err = scrape::extract(&mds, &strict).unwrap_err();
    assert_eq!(err, ExtractError::MalformedEvent { matchday: 4, raw: "TeamAOnly".into() });
    assert!(err.to_string().contains("TeamAOnly"));

    // lenient mode drops the event whole and keeps its neighbours
    let lenient = scrape::extract(&mds, &ExtractOptions::default()).unwrap();
    assert_eq!(lenient.rows.len(), 1);
    assert_eq!(lenient.rows[0].home, "A");
    assert_eq!(lenient.rejected, vec![err]);
}
