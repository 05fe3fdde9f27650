use crate::UserRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the list as pretty JSON, in the same camelCase shape the service uses.
pub fn save_json(users: &[UserRecord], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(users)?.as_bytes())?;
    log::info!("wrote {} users to {}", users.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_list_as_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let users = vec![UserRecord {
            id: 11,
            first_name: "Bob".into(),
            last_name: "X".into(),
            email: "b@x.com".into(),
            department: "Eng".into(),
        }];

        save_json(&users, &path).unwrap();

        let written: Vec<UserRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, users);
    }
}
