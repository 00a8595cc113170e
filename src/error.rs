//! Ошибки крейта
//!
//! Операции «горячего пути» (доступ к тайлам, поиск пути, добыча ресурсов) не возвращают ошибок:
//! отсутствие результата выражается через `Option`/`bool`. `MapError` используется только на границах:
//! создание карты, загрузка и проверка конфигурации, экспорт изображений.

use thiserror::Error;

/// Ошибки создания карты, конфигурации и экспорта
#[derive(Debug, Error)]
pub enum MapError {
    /// Карта с нулевой шириной или высотой не имеет ни одного тайла
    #[error("invalid map dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Запрошенная ширина
        width: u32,
        /// Запрошенная высота
        height: u32,
    },

    /// Нижняя граница диапазона больше верхней
    #[error("invalid range for `{field}`: {min} > {max}")]
    InvalidRange {
        /// Имя параметра в конфигурации
        field: &'static str,
        /// Нижняя граница
        min: u32,
        /// Верхняя граница
        max: u32,
    },

    /// Вероятность вне отрезка [0, 1]
    #[error("probability `{field}` must be within [0, 1], got {value}")]
    InvalidProbability {
        /// Имя параметра в конфигурации
        field: &'static str,
        /// Недопустимое значение
        value: f64,
    },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Размер буфера пикселей не совпадает с размером изображения
    #[error("failed to create {width}x{height} image buffer")]
    ImageBuffer {
        /// Ширина изображения
        width: u32,
        /// Высота изображения
        height: u32,
    },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
