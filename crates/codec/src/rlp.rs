//! Canonical-compatible RLP encoding for the three entities the upstream
//! node itself encodes this way (§4.2): blocks, transactions, receipts.
//! Encoding is hand-rolled rather than derived because several fields
//! (`Option<Address>`, `Option<U256>`) need list-wrapped optionality to stay
//! unambiguous — an absent fee cap must not collide with a present cap of
//! zero, which plain RLP string encoding cannot tell apart.

use alloy_primitives::U256;
use alloy_rlp::{BufMut, Decodable, Encodable, Header};
use chainidx_types::{
    Address, Block, CallType, Error, Hash32, Log, Receipt, Result, Transaction, TransactionType,
};

fn rlp_err(e: alloy_rlp::Error) -> Error {
    Error::invalid_data(format!("rlp decode failed: {e}"))
}

fn encode_opt<T: Encodable>(opt: &Option<T>, out: &mut dyn BufMut) {
    let mut body = Vec::new();
    if let Some(v) = opt {
        v.encode(&mut body);
    }
    Header {
        list: true,
        payload_length: body.len(),
    }
    .encode(out);
    out.put_slice(&body);
}

fn decode_opt<T: Decodable>(buf: &mut &[u8]) -> alloy_rlp::Result<Option<T>> {
    let header = Header::decode(buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString);
    }
    let mut payload = &buf[..header.payload_length];
    *buf = &buf[header.payload_length..];
    if payload.is_empty() {
        Ok(None)
    } else {
        Ok(Some(T::decode(&mut payload)?))
    }
}

fn wrap_list(body: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 9);
    Header {
        list: true,
        payload_length: body.len(),
    }
    .encode(&mut out);
    out.extend_from_slice(&body);
    out
}

fn take_list_payload<'a>(buf: &mut &'a [u8]) -> alloy_rlp::Result<&'a [u8]> {
    let header = Header::decode(buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString);
    }
    let payload = &buf[..header.payload_length];
    *buf = &buf[header.payload_length..];
    Ok(payload)
}

// ---------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------

pub fn encode_block(block: &Block) -> Vec<u8> {
    let mut body = Vec::new();
    block.number.encode(&mut body);
    block.hash.encode(&mut body);
    block.parent_hash.encode(&mut body);
    block.timestamp.encode(&mut body);
    block.miner.encode(&mut body);
    block.gas_limit.encode(&mut body);
    block.gas_used.encode(&mut body);
    block.transactions.encode(&mut body);
    wrap_list(body)
}

pub fn decode_block(bytes: &[u8]) -> Result<Block> {
    let mut buf = bytes;
    let mut payload = take_list_payload(&mut buf).map_err(rlp_err)?;
    let number = u64::decode(&mut payload).map_err(rlp_err)?;
    let hash = Hash32::decode(&mut payload).map_err(rlp_err)?;
    let parent_hash = Hash32::decode(&mut payload).map_err(rlp_err)?;
    let timestamp = u64::decode(&mut payload).map_err(rlp_err)?;
    let miner = Address::decode(&mut payload).map_err(rlp_err)?;
    let gas_limit = u64::decode(&mut payload).map_err(rlp_err)?;
    let gas_used = u64::decode(&mut payload).map_err(rlp_err)?;
    let transactions = Vec::<Hash32>::decode(&mut payload).map_err(rlp_err)?;
    Ok(Block {
        number,
        hash,
        parent_hash,
        timestamp,
        miner,
        gas_limit,
        gas_used,
        transactions,
    })
}

// ---------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------

pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    let mut body = Vec::new();
    tx.hash.encode(&mut body);
    tx.tx_type.tag().encode(&mut body);
    tx.from.encode(&mut body);
    encode_opt(&tx.to, &mut body);
    tx.value.encode(&mut body);
    tx.gas_price.encode(&mut body);
    encode_opt(&tx.gas_tip_cap, &mut body);
    encode_opt(&tx.gas_fee_cap, &mut body);
    tx.gas_limit.encode(&mut body);
    tx.nonce.encode(&mut body);
    tx.input.encode(&mut body);
    wrap_list(body)
}

pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction> {
    let mut buf = bytes;
    let mut payload = take_list_payload(&mut buf).map_err(rlp_err)?;
    let hash = Hash32::decode(&mut payload).map_err(rlp_err)?;
    let tag = u8::decode(&mut payload).map_err(rlp_err)?;
    let from = Address::decode(&mut payload).map_err(rlp_err)?;
    let to = decode_opt::<Address>(&mut payload).map_err(rlp_err)?;
    let value = U256::decode(&mut payload).map_err(rlp_err)?;
    let gas_price = U256::decode(&mut payload).map_err(rlp_err)?;
    let gas_tip_cap = decode_opt::<U256>(&mut payload).map_err(rlp_err)?;
    let gas_fee_cap = decode_opt::<U256>(&mut payload).map_err(rlp_err)?;
    let gas_limit = u64::decode(&mut payload).map_err(rlp_err)?;
    let nonce = u64::decode(&mut payload).map_err(rlp_err)?;
    let input = Vec::<u8>::decode(&mut payload).map_err(rlp_err)?;
    Ok(Transaction {
        hash,
        tx_type: TransactionType::from_tag(tag),
        from,
        to,
        value,
        gas_price,
        gas_tip_cap,
        gas_fee_cap,
        gas_limit,
        nonce,
        input,
    })
}

// ---------------------------------------------------------------------
// Receipt (tx_hash is restored from the key by the caller, not encoded)
// ---------------------------------------------------------------------

fn encode_log(log: &Log) -> Vec<u8> {
    let mut body = Vec::new();
    log.address.encode(&mut body);
    log.topics.encode(&mut body);
    log.data.encode(&mut body);
    log.log_index.encode(&mut body);
    wrap_list(body)
}

fn decode_log(buf: &mut &[u8]) -> alloy_rlp::Result<Log> {
    let mut payload = take_list_payload(buf)?;
    let address = Address::decode(&mut payload)?;
    let topics = Vec::<Hash32>::decode(&mut payload)?;
    let data = Vec::<u8>::decode(&mut payload)?;
    let log_index = u32::decode(&mut payload)?;
    Ok(Log {
        address,
        topics,
        data,
        log_index,
    })
}

pub fn encode_receipt(receipt: &Receipt) -> Vec<u8> {
    let mut body = Vec::new();
    receipt.status.encode(&mut body);
    receipt.cumulative_gas_used.encode(&mut body);
    receipt.gas_used.encode(&mut body);
    let logs_body: Vec<u8> = receipt.logs.iter().flat_map(encode_log).collect();
    body.extend_from_slice(&wrap_list(logs_body));
    encode_opt(&receipt.contract_address, &mut body);
    receipt.effective_gas_price.encode(&mut body);
    wrap_list(body)
}

pub fn decode_receipt(bytes: &[u8], tx_hash: Hash32) -> Result<Receipt> {
    let mut buf = bytes;
    let mut payload = take_list_payload(&mut buf).map_err(rlp_err)?;
    let status = u8::decode(&mut payload).map_err(rlp_err)?;
    let cumulative_gas_used = u64::decode(&mut payload).map_err(rlp_err)?;
    let gas_used = u64::decode(&mut payload).map_err(rlp_err)?;
    let mut logs_payload = take_list_payload(&mut payload).map_err(rlp_err)?;
    let mut logs = Vec::new();
    while !logs_payload.is_empty() {
        logs.push(decode_log(&mut logs_payload).map_err(rlp_err)?);
    }
    let contract_address = decode_opt::<Address>(&mut payload).map_err(rlp_err)?;
    let effective_gas_price = U256::decode(&mut payload).map_err(rlp_err)?;
    Ok(Receipt {
        tx_hash,
        status,
        cumulative_gas_used,
        gas_used,
        logs,
        contract_address,
        effective_gas_price,
    })
}

/// internal-transaction call type is never RLP-encoded (only blocks, txs,
/// and receipts need upstream byte compatibility); kept here so callers
/// encoding a full trace frame by hand have one place to convert the tag.
pub fn call_type_tag(call_type: CallType) -> u8 {
    match call_type {
        CallType::Call => 0,
        CallType::StaticCall => 1,
        CallType::DelegateCall => 2,
        CallType::Create => 3,
        CallType::Create2 => 4,
        CallType::SelfDestruct => 5,
    }
}
