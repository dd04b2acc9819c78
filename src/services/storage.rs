use crate::cli::RuleTarget;
use crate::domain::models::{ConfigFile, InstallRecord, State};
use std::path::PathBuf;

fn config_base_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/rulekit"))
}

fn state_path() -> anyhow::Result<PathBuf> {
    Ok(config_base_dir()?.join("state.json"))
}

fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_base_dir()?.join("config.toml"))
}

pub fn unix_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ts.to_string()
}

pub fn audit(action: &str, data: serde_json::Value) {
    let Ok(base) = config_base_dir() else {
        return;
    };
    let path = base.join("audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_timestamp(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

pub fn load_config() -> anyhow::Result<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

pub fn load_state() -> anyhow::Result<State> {
    let p = state_path()?;
    if !p.exists() {
        return Ok(State::default());
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_state(state: &State) -> anyhow::Result<()> {
    let p = state_path()?;
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

pub fn upsert_install(state: &mut State, entry: InstallRecord) {
    if let Some(existing) = state
        .installs
        .iter_mut()
        .find(|i| i.project == entry.project && i.target == entry.target)
    {
        *existing = entry;
    } else {
        state.installs.push(entry);
    }
}

pub fn remove_install(state: &mut State, project: &str, target: RuleTarget) {
    state.installs.retain(|i| {
        !(i.project == project && (matches!(target, RuleTarget::All) || i.target == target))
    });
}
