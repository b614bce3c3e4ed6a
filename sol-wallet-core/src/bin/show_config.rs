use sol_wallet_core::{WalletCoreConfig, NAME, VERSION};
use std::process::ExitCode;

fn main() -> ExitCode {
    sol_wallet_core::init_logging();

    let config = match WalletCoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid wallet core configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} {} Configuration:\n", NAME, VERSION);
    println!("  Storage directory: {}", config.storage_dir.display());
    println!("  PIN key derivation: {}", config.kdf.algorithm);
    println!("    Argon2 memory (KiB): {}", config.kdf.memory_cost);
    println!("    Argon2 iterations: {}", config.kdf.iterations);
    println!("    Argon2 parallelism: {}", config.kdf.parallelism);
    println!("    PBKDF2 rounds: {}", config.kdf.pbkdf2_rounds);
    println!("  Cipher: {}", config.encryption_algorithm);
    println!("  Master mnemonic: {} words", config.master_mnemonic_strength.word_count());
    ExitCode::SUCCESS
}
