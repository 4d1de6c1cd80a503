//! User profile model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The signed-in user's profile as returned by `GET /users/profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telp: Option<String>,
    #[serde(default)]
    pub tanggal_lahir: Option<String>,
    #[serde(default)]
    pub tempat_lahir: Option<String>,
    #[serde(default)]
    pub jenis_kelamin: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub agama: Option<String>,
    #[serde(default)]
    pub sekolah: Option<String>,
    #[serde(default)]
    pub alamat: Option<String>,
    /// Image reference (URL or data URL)
    #[serde(default)]
    pub profile: Option<String>,
}

/// Fields editable from the account details screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Telp,
    TanggalLahir,
    TempatLahir,
    JenisKelamin,
    Status,
    Agama,
    Sekolah,
    Alamat,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Telp,
        ProfileField::TanggalLahir,
        ProfileField::TempatLahir,
        ProfileField::JenisKelamin,
        ProfileField::Status,
        ProfileField::Agama,
        ProfileField::Sekolah,
        ProfileField::Alamat,
    ];

    /// JSON key sent to `PUT /users/update`.
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Telp => "telp",
            ProfileField::TanggalLahir => "tanggal_lahir",
            ProfileField::TempatLahir => "tempat_lahir",
            ProfileField::JenisKelamin => "jenis_kelamin",
            ProfileField::Status => "status",
            ProfileField::Agama => "agama",
            ProfileField::Sekolah => "sekolah",
            ProfileField::Alamat => "alamat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "Nama Lengkap",
            ProfileField::Email => "Email",
            ProfileField::Telp => "No. Telepon",
            ProfileField::TanggalLahir => "Tanggal Lahir",
            ProfileField::TempatLahir => "Tempat Lahir",
            ProfileField::JenisKelamin => "Jenis Kelamin",
            ProfileField::Status => "Status",
            ProfileField::Agama => "Agama",
            ProfileField::Sekolah => "Sekolah",
            ProfileField::Alamat => "Alamat",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| {
                let keys: Vec<_> = ProfileField::ALL.iter().map(|f| f.key()).collect();
                format!("unknown field '{}', expected one of: {}", s, keys.join(", "))
            })
    }
}

impl UserProfile {
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Telp => &self.telp,
            ProfileField::TanggalLahir => &self.tanggal_lahir,
            ProfileField::TempatLahir => &self.tempat_lahir,
            ProfileField::JenisKelamin => &self.jenis_kelamin,
            ProfileField::Status => &self.status,
            ProfileField::Agama => &self.agama,
            ProfileField::Sekolah => &self.sekolah,
            ProfileField::Alamat => &self.alamat,
        };
        value.as_deref()
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Telp => &mut self.telp,
            ProfileField::TanggalLahir => &mut self.tanggal_lahir,
            ProfileField::TempatLahir => &mut self.tempat_lahir,
            ProfileField::JenisKelamin => &mut self.jenis_kelamin,
            ProfileField::Status => &mut self.status,
            ProfileField::Agama => &mut self.agama,
            ProfileField::Sekolah => &mut self.sekolah,
            ProfileField::Alamat => &mut self.alamat,
        };
        *slot = Some(value);
    }

    /// Display value; empty and missing both read "N/A".
    pub fn display(&self, field: ProfileField) -> &str {
        self.get(field).filter(|v| !v.is_empty()).unwrap_or("N/A")
    }
}

/// Request body for `POST /users/profile-image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImageUpload {
    /// `data:<mime>;base64,<payload>`
    pub profile_image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip_through_parse() {
        assert_eq!("tanggal_lahir".parse::<ProfileField>(), Ok(ProfileField::TanggalLahir));
        assert!("password".parse::<ProfileField>().is_err());
    }

    #[test]
    fn test_display_falls_back_to_na() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.display(ProfileField::Sekolah), "N/A");
        profile.set(ProfileField::Sekolah, "SMK Wikrama Bogor".into());
        assert_eq!(profile.display(ProfileField::Sekolah), "SMK Wikrama Bogor");
        profile.set(ProfileField::Alamat, String::new());
        assert_eq!(profile.display(ProfileField::Alamat), "N/A");
    }

    #[test]
    fn test_partial_profile_deserializes() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"name":"Sari","sekolah":null,"extra":1}"#).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Sari"));
        assert!(profile.sekolah.is_none());
    }
}
