//! Living Off The Land Binaries (LOLBins)
//!
//! Legitimate OS-shipped binaries abused to run malicious actions while
//! evading binary-based detection. A service whose image path invokes one
//! of these with suspicious arguments is a strong persistence signal -
//! no legitimate installer registers `cmd.exe /c ...` as a service binary.

/// A LOLBin entry: binary name + argument patterns that indicate abuse
/// (substring match, case-insensitive).
pub struct LolbinEntry {
    pub name: &'static str,
    pub suspicious_args: &'static [&'static str],
    pub description: &'static str,
}

/// Known LOLBins abused through service image paths
pub static LOLBINS: &[LolbinEntry] = &[
    LolbinEntry {
        name: "cmd.exe",
        suspicious_args: &["/c ", "/k ", "/r "],
        description: "Command interpreter run-and-exit, classic psexec-style payload",
    },
    LolbinEntry {
        name: "powershell.exe",
        suspicious_args: &[
            "-enc",
            "-encodedcommand",
            "-nop",
            "-noprofile",
            "-ep bypass",
            "-executionpolicy bypass",
            "-w hidden",
            "iex",
            "invoke-expression",
            "downloadstring",
            "downloadfile",
            "net.webclient",
        ],
        description: "PowerShell with evasion or download-cradle switches",
    },
    LolbinEntry {
        name: "rundll32.exe",
        suspicious_args: &["javascript:", "comsvcs.dll", "minidump", "http://", "https://", "\\\\"],
        description: "DLL loader executing arbitrary exports or remote payloads",
    },
    LolbinEntry {
        name: "regsvr32.exe",
        suspicious_args: &["/i:", "scrobj.dll", "http://", "https://", "/u "],
        description: "COM registration squiblydoo bypass",
    },
    LolbinEntry {
        name: "mshta.exe",
        suspicious_args: &["javascript:", "vbscript:", "http://", "https://"],
        description: "HTML Application host executing scripts from URLs",
    },
    LolbinEntry {
        name: "certutil.exe",
        suspicious_args: &["-urlcache", "-split", "-decode", "-decodehex", "http://", "https://"],
        description: "Certificate utility abused for download/decode",
    },
    LolbinEntry {
        name: "bitsadmin.exe",
        suspicious_args: &["/transfer", "/addfile", "http://", "https://"],
        description: "BITS admin background download",
    },
    LolbinEntry {
        name: "wscript.exe",
        suspicious_args: &[".js", ".vbs", ".wsf", "//e:", "//b"],
        description: "Windows Script Host executing scripts",
    },
    LolbinEntry {
        name: "cscript.exe",
        suspicious_args: &[".js", ".vbs", ".wsf", "//e:", "//b"],
        description: "Console Script Host executing scripts",
    },
    LolbinEntry {
        name: "wmic.exe",
        suspicious_args: &["process call create", "/node:", "shadowcopy delete"],
        description: "WMI command line for remote execution",
    },
    LolbinEntry {
        name: "msiexec.exe",
        suspicious_args: &["/q", "http://", "https://", "\\\\"],
        description: "Windows Installer pulling remote MSI payloads",
    },
];

/// Does this raw command line match a known-malicious LOLBin pattern?
pub fn is_known_malicious_lolbin(command_line: &str) -> bool {
    let lower = command_line.to_lowercase();

    let hit = LOLBINS.iter().find(|entry| {
        lower.contains(entry.name)
            && entry.suspicious_args.iter().any(|arg| lower.contains(arg))
    });

    if let Some(entry) = hit {
        log::debug!("LOLBin match '{}': {}", entry.name, entry.description);
        return true;
    }
    false
}

// ============================================================================
// TESTS
// ============================================================================
