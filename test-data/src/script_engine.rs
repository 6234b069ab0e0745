use chain::IndexedBlock;
use primitives::bytes::Bytes;
use storage::TransactionDataMap;

/// Script engine stand-in that prices scripts by their opcodes.
///
/// `OP_CHECKSIG`/`OP_CHECKSIGVERIFY` count as one operation and the
/// multisig variants as twenty, mirroring the real counter's weighting.
/// Data pushes are skipped. A signature script containing a bare
/// `OP_RETURN` fails execution, which lets tests plant deliberately
/// unverifiable inputs.
pub struct OpcodeScriptEngine;

const OP_PUSH_MAX: u8 = 0x4b;
const OP_RETURN: u8 = 0x6a;
const OP_CHECKSIG: u8 = 0xac;
const OP_CHECKSIGVERIFY: u8 = 0xad;
const OP_CHECKMULTISIG: u8 = 0xae;
const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

impl OpcodeScriptEngine {
	/// Returns the final data push of a script, the place a redeem script
	/// lives in a pay-to-script-hash spend.
	fn last_push<'a>(&self, script: &'a [u8]) -> &'a [u8] {
		let mut last: &[u8] = &[];
		let mut pc = 0;
		while pc < script.len() {
			let opcode = script[pc];
			pc += 1;
			if (0x01..=OP_PUSH_MAX).contains(&opcode) {
				let end = (pc + opcode as usize).min(script.len());
				last = &script[pc..end];
				pc = end;
			} else {
				last = &[];
			}
		}
		last
	}
}

impl script::ScriptEngine for OpcodeScriptEngine {
	fn sig_op_count(&self, script: &[u8]) -> usize {
		let mut sigops = 0;
		let mut pc = 0;
		while pc < script.len() {
			let opcode = script[pc];
			pc += 1;
			match opcode {
				0x01..=OP_PUSH_MAX => pc += opcode as usize,
				OP_CHECKSIG | OP_CHECKSIGVERIFY => sigops += 1,
				OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => sigops += 20,
				_ => {},
			}
		}
		sigops
	}

	fn precise_sig_op_count(&self, signature_script: &[u8], pubkey_script: &[u8], bip16: bool) -> usize {
		if bip16 && self.is_pay_to_script_hash(pubkey_script) {
			self.sig_op_count(self.last_push(signature_script))
		} else {
			self.sig_op_count(pubkey_script)
		}
	}

	fn is_pay_to_script_hash(&self, script: &[u8]) -> bool {
		script.len() == 23 && script[0] == 0xa9 && script[1] == 0x14 && script[22] == 0x87
	}

	fn verify_block_scripts(&self, block: &IndexedBlock, _store: &TransactionDataMap) -> Result<(), script::Error> {
		for (transaction_index, tx) in block.transactions.iter().enumerate().skip(1) {
			for (input_index, input) in tx.raw.inputs.iter().enumerate() {
				if input.script_sig.contains(&OP_RETURN) {
					return Err(script::Error { transaction_index, input_index });
				}
			}
		}
		Ok(())
	}
}

/// The canonical 23-byte pay-to-script-hash output script, with a zeroed
/// script hash.
pub fn p2sh_script() -> Bytes {
	let mut script = vec![0xa9, 0x14];
	script.extend_from_slice(&[0u8; 20]);
	script.push(0x87);
	Bytes::from(script)
}

/// A signature script consisting of a single data push of `redeem`.
pub fn p2sh_redeem_push(redeem: &[u8]) -> Bytes {
	assert!(redeem.len() <= OP_PUSH_MAX as usize, "redeem script too long for a single push");
	let mut script = vec![redeem.len() as u8];
	script.extend_from_slice(redeem);
	Bytes::from(script)
}

#[cfg(test)]
mod tests {
	use script::ScriptEngine;
	use super::{p2sh_redeem_push, p2sh_script, OpcodeScriptEngine};

	#[test]
	fn counts_checksig_family() {
		let engine = OpcodeScriptEngine;
		assert_eq!(engine.sig_op_count(&[0xac, 0xad]), 2);
		assert_eq!(engine.sig_op_count(&[0xae]), 20);
	}

	#[test]
	fn pushes_hide_their_payload() {
		let engine = OpcodeScriptEngine;
		let script = p2sh_redeem_push(&[0xac, 0xac, 0xac]);
		assert_eq!(engine.sig_op_count(&script), 0);
	}

	#[test]
	fn recognises_canonical_p2sh() {
		let engine = OpcodeScriptEngine;
		assert!(engine.is_pay_to_script_hash(&p2sh_script()));
		assert!(!engine.is_pay_to_script_hash(&[0xa9, 0x14]));
	}

	#[test]
	fn precise_count_reads_the_redeem_script() {
		let engine = OpcodeScriptEngine;
		let sig = p2sh_redeem_push(&[0xac, 0xae]);
		assert_eq!(engine.precise_sig_op_count(&sig, &p2sh_script(), true), 21);
		// without the flag, only the pubkey script is priced
		assert_eq!(engine.precise_sig_op_count(&sig, &p2sh_script(), false), 0);
	}
}
