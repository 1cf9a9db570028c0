// src/services/kml.rs

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use sqlx::PgPool;

use crate::{
    common::error::AppError, db::CollarRepository, models::collar::TrackUploadSummary,
};

// Um placemark completo do arquivo de trajeto: tripla de coordenadas
// (ordem KML: lon,lat,alt) + carimbo de tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ParsedTrack {
    pub points: Vec<TrackPoint>,
    // Placemarks sem coordenadas/`when`, ou com valores imprestáveis
    pub skipped: usize,
}

/// Extrai os pontos de trajeto de um documento KML.
///
/// XML malformado é erro (nada será gravado); placemark individual
/// incompleto é pulado em silêncio e o lote continua.
pub fn parse_kml(xml: &str) -> Result<ParsedTrack, AppError> {
    let mut reader = Reader::from_str(xml);

    let mut track = ParsedTrack::default();

    let mut in_placemark = false;
    let mut in_point = false;
    let mut in_timestamp = false;
    let mut in_coordinates = false;
    let mut in_when = false;
    let mut coordinates: Option<String> = None;
    let mut when: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Placemark" => {
                    in_placemark = true;
                    coordinates = None;
                    when = None;
                }
                b"Point" if in_placemark => in_point = true,
                b"TimeStamp" if in_placemark => in_timestamp = true,
                b"coordinates" if in_point => in_coordinates = true,
                b"when" if in_timestamp => in_when = true,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::InvalidUpload(format!("XML inválido: {}", e)))?;
                if in_coordinates {
                    coordinates = Some(text.trim().to_string());
                } else if in_when {
                    when = Some(text.trim().to_string());
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Placemark" => {
                    in_placemark = false;
                    match build_point(coordinates.take(), when.take()) {
                        Some(point) => track.points.push(point),
                        None => track.skipped += 1,
                    }
                }
                b"Point" => in_point = false,
                b"TimeStamp" => in_timestamp = false,
                b"coordinates" => in_coordinates = false,
                b"when" => in_when = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(AppError::InvalidUpload(format!("XML inválido: {}", e))),
        }
    }

    Ok(track)
}

// Monta o ponto a partir dos textos crus; qualquer pedaço faltando ou
// imprestável descarta o placemark inteiro.
fn build_point(coordinates: Option<String>, when: Option<String>) -> Option<TrackPoint> {
    let coordinates = coordinates?;
    let when = when?;

    let mut parts = coordinates.split(',').map(str::trim);
    let longitude: f64 = parts.next()?.parse().ok()?;
    let latitude: f64 = parts.next()?.parse().ok()?;
    let altitude: f64 = match parts.next() {
        Some(raw) => raw.parse().ok()?,
        None => 0.0,
    };

    let timestamp = DateTime::parse_from_rfc3339(&when)
        .ok()?
        .with_timezone(&Utc);

    Some(TrackPoint { longitude, latitude, altitude, timestamp })
}

/// Ingestão de trajetos: valida o arquivo, extrai os placemarks e grava
/// todos os pontos sobreviventes em um único lote transacional.
#[derive(Clone)]
pub struct KmlService {
    collar_repo: CollarRepository,
    pool: PgPool,
}

impl KmlService {
    pub fn new(collar_repo: CollarRepository, pool: PgPool) -> Self {
        Self { collar_repo, pool }
    }

    pub async fn ingest_track(
        &self,
        collar_id: i32,
        file_name: &str,
        contents: &[u8],
    ) -> Result<TrackUploadSummary, AppError> {
        // Recusa antes de tocar no banco: extensão errada ou bytes que não
        // são um documento de texto.
        let extension = file_name.rsplit('.').next().unwrap_or_default();
        if !extension.eq_ignore_ascii_case("kml") {
            return Err(AppError::InvalidUpload(
                "Esperado um arquivo .kml".to_string(),
            ));
        }

        let xml = std::str::from_utf8(contents)
            .map_err(|_| AppError::InvalidUpload("O arquivo não é um texto UTF-8".to_string()))?;

        let track = parse_kml(xml)?;

        // O colar alvo precisa existir antes de abrir o lote
        self.collar_repo
            .find_by_id(collar_id)
            .await?
            .ok_or(AppError::NotFound("Colar não encontrado."))?;

        let mut tx = self.pool.begin().await?;
        for point in &track.points {
            self.collar_repo
                .insert_track_point(
                    &mut *tx,
                    collar_id,
                    point.longitude,
                    point.latitude,
                    point.altitude,
                    point.timestamp,
                )
                .await?;
        }
        tx.commit().await?;

        tracing::info!(
            "Trajeto do colar {}: {} pontos gravados, {} placemarks pulados",
            collar_id,
            track.points.len(),
            track.skipped
        );

        Ok(TrackUploadSummary {
            collar_id,
            inserted: track.points.len(),
            skipped: track.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placemark(coordinates: Option<&str>, when: Option<&str>) -> String {
        let mut xml = String::from("<Placemark>");
        if let Some(c) = coordinates {
            xml.push_str(&format!("<Point><coordinates>{}</coordinates></Point>", c));
        }
        if let Some(w) = when {
            xml.push_str(&format!("<TimeStamp><when>{}</when></TimeStamp>", w));
        }
        xml.push_str("</Placemark>");
        xml
    }

    fn document(placemarks: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><kml xmlns="http://www.opengis.net/kml/2.2"><Document>{}</Document></kml>"#,
            placemarks.concat()
        )
    }

    #[test]
    fn parses_complete_placemarks() {
        let xml = document(&[placemark(
            Some("21.79,40.30,612.5"),
            Some("2024-05-02T08:30:00Z"),
        )]);
        let track = parse_kml(&xml).unwrap();
        assert_eq!(track.points.len(), 1);
        assert_eq!(track.skipped, 0);

        let point = &track.points[0];
        // Ordem KML no arquivo: lon,lat,alt
        assert_eq!(point.longitude, 21.79);
        assert_eq!(point.latitude, 40.30);
        assert_eq!(point.altitude, 612.5);
        assert_eq!(
            point.timestamp,
            DateTime::parse_from_rfc3339("2024-05-02T08:30:00Z").unwrap()
        );
    }

    #[test]
    fn skips_placemark_without_timestamp_and_keeps_the_rest() {
        // 3 completos + 1 sem <when>: o lote segue com 3
        let xml = document(&[
            placemark(Some("21.0,40.0,100"), Some("2024-05-02T08:00:00Z")),
            placemark(Some("21.1,40.1,110"), Some("2024-05-02T08:10:00Z")),
            placemark(Some("21.2,40.2,120"), None),
            placemark(Some("21.3,40.3,130"), Some("2024-05-02T08:30:00Z")),
        ]);
        let track = parse_kml(&xml).unwrap();
        assert_eq!(track.points.len(), 3);
        assert_eq!(track.skipped, 1);
    }

    #[test]
    fn skips_placemark_with_garbage_values() {
        let xml = document(&[
            placemark(Some("leste,norte,alto"), Some("2024-05-02T08:00:00Z")),
            placemark(Some("21.0,40.0,100"), Some("ontem de manhã")),
        ]);
        let track = parse_kml(&xml).unwrap();
        assert!(track.points.is_empty());
        assert_eq!(track.skipped, 2);
    }

    #[test]
    fn altitude_is_optional_in_the_triple() {
        let xml = document(&[placemark(Some("21.0,40.0"), Some("2024-05-02T08:00:00Z"))]);
        let track = parse_kml(&xml).unwrap();
        assert_eq!(track.points.len(), 1);
        assert_eq!(track.points[0].altitude, 0.0);
    }

    #[test]
    fn namespaced_elements_are_recognized() {
        let xml = r#"<?xml version="1.0"?>
            <kml:kml xmlns:kml="http://www.opengis.net/kml/2.2">
              <kml:Placemark>
                <kml:Point><kml:coordinates>21.5,40.5,200</kml:coordinates></kml:Point>
                <kml:TimeStamp><kml:when>2024-05-02T09:00:00Z</kml:when></kml:TimeStamp>
              </kml:Placemark>
            </kml:kml>"#;
        let track = parse_kml(xml).unwrap();
        assert_eq!(track.points.len(), 1);
        assert_eq!(track.points[0].latitude, 40.5);
    }

    #[test]
    fn broken_xml_is_an_error_not_a_skip() {
        let result = parse_kml("<kml><Placemark><Point></kml>");
        assert!(matches!(result, Err(AppError::InvalidUpload(_))));
    }
}
