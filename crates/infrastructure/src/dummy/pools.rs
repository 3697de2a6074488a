//! Value pools the generator draws from

use domain::AlertLevel;

pub const ROBOT_NAMES: [&str; 10] = [
    "Scout-001", "Scout-002", "Scout-003", "Scout-004", "Scout-005", "Scout-006", "Scout-007",
    "Scout-008", "Scout-009", "Scout-010",
];

pub const ROBOT_MODELS: [&str; 5] = [
    "ITR-2024-A",
    "ITR-2024-B",
    "ITR-2024-C",
    "ITR-2023-A",
    "ITR-2023-B",
];

pub const MANUFACTURERS: [&str; 4] = [
    "RoboTech",
    "Smart Solutions",
    "AI Robot Systems",
    "InfoScout Robotics",
];

pub const TECHNICIANS: [&str; 5] = [
    "Kim Gi-sul",
    "Lee Jeong-bi",
    "Park Engineer",
    "Choi Jeon-mun",
    "Jung Su-ri",
];

pub const FIRST_NAMES: [&str; 8] = [
    "Min-jun", "Seo-yeon", "Ji-ho", "Ha-eun", "Do-yun", "Su-ah", "Ye-jun", "Ji-woo",
];

pub const LAST_NAMES: [&str; 6] = ["Kim", "Lee", "Park", "Choi", "Jung", "Kang"];

pub const DEPARTMENTS: [&str; 7] = [
    "IT",
    "Information Management",
    "Maintenance",
    "Operations",
    "Data Analytics",
    "AI Development",
    "R&D",
];

pub const PARTS: [&str; 17] = [
    "Battery pack",
    "Motor",
    "Sensor module",
    "Camera",
    "Wheel",
    "Brake pad",
    "Filter",
    "Pump",
    "Wiring",
    "Controller",
    "Scanner",
    "Printer",
    "Network module",
    "AI processor",
    "Memory module",
    "Search engine module",
    "Document processing module",
];

pub const DETECTION_CLASSES: [&str; 8] = [
    "person", "vehicle", "forklift", "pallet", "door", "obstacle", "document", "sign",
];

pub const COMMAND_TYPES: [&str; 5] = [
    "move_to",
    "start_patrol",
    "return_to_dock",
    "capture_image",
    "reboot",
];

pub const CONNECTIONS: [&str; 3] = ["wifi", "lte", "5g"];

/// Seoul bounding box (latitude, longitude)
pub const SEOUL_LAT: (f64, f64) = (37.4133, 37.7151);
pub const SEOUL_LNG: (f64, f64) = (126.7341, 127.2693);

pub fn alert_messages(level: AlertLevel) -> &'static [&'static str] {
    match level {
        AlertLevel::Info => &[
            "Operating normally",
            "Battery charging complete",
            "Routine inspection complete",
            "New firmware update available",
            "Information collection task complete",
            "Database connection healthy",
            "Document scan complete",
            "Information indexing complete",
            "Search engine operating normally",
            "AI model training complete",
        ],
        AlertLevel::Warning => &[
            "Battery level low (below 20%)",
            "Routine inspection required",
            "Sensor data anomaly detected",
            "Network connection unstable",
            "Information collection slowed down",
            "Memory usage increasing",
            "Scanner performance degraded",
            "Search accuracy decreased",
            "AI model performance degraded",
            "Storage space running low",
        ],
        AlertLevel::Error => &[
            "Automatic shutdown due to low battery",
            "Sensor malfunction detected",
            "Motor overheating",
            "Communication error",
            "Information collection failed",
            "Database connection error",
            "Scanner failure",
            "AI model error",
            "Search system error",
            "Document processing failed",
        ],
        AlertLevel::Critical => &[
            "Emergency stop required - safety risk",
            "Complete halt due to system error",
            "Battery fully discharged",
            "Inoperable due to sensor failure",
            "Information collection system halted",
            "Risk of data loss",
            "AI system halted",
            "Search engine failure",
            "Scanner system damaged",
            "Full system recovery required",
        ],
    }
}
