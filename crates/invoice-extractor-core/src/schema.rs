//! The fixed invoice schema and the prompt that asks the model to fill it.

use crate::InvoiceData;

/// Top-level field names the model is instructed to populate.
pub const INVOICE_FIELDS: &[&str] = &[
    "CustomerName",
    "CustomerId",
    "PurchaseOrder",
    "InvoiceId",
    "InvoiceDate",
    "DueDate",
    "VendorName",
    "VendorAddress",
    "VendorAddressRecipient",
    "CustomerAddress",
    "CustomerAddressRecipient",
    "BillingAddress",
    "BillingAddressRecipient",
    "ShippingAddress",
    "ShippingAddressRecipient",
    "SubTotal",
    "TotalDiscount",
    "TotalTax",
    "InvoiceTotal",
    "AmountDue",
    "PreviousUnpaidBalance",
    "RemittanceAddress",
    "RemittanceAddressRecipient",
    "ServiceAddress",
    "ServiceAddressRecipient",
    "ServiceStartDate",
    "ServiceEndDate",
    "VendorTaxId",
    "CustomerTaxId",
    "PaymentTerm",
    "KVKNumber",
    "PaymentDetails",
    "PaymentDetails(IBAN)",
    "PaymentDetails(SWIFT)",
    "PaymentDetails(BankAccountNumber)",
    "PaymentDetails(BPayBillerCode)",
    "PaymentDetails(BPayReference)",
    "TaxDetails",
    "TaxDetails(Amount)",
    "TaxDetails(Rate)",
    "PaidInFourInstallements",
    "PaidInFourInstallements(Amount)",
    "PaidInFourInstallements(DueDate)",
    "Items",
    "Items(Amount)",
    "Items(Date)",
    "Items(Description)",
    "Items(Quantity)",
    "Items(ProductCode)",
    "Items(Tax)",
    "Items(TaxRate)",
    "Items(Unit)",
    "Items(UnitPrice)",
];

/// System prompt sent with every extraction request.
pub const EXTRACTION_PROMPT: &str = "Extract invoice details, including customer and vendor information, totals, and line items, from all pages of the document, ensuring that all relevant information is captured, even if it spans multiple pages. Identify and extract data from tables, including those containing checkboxes.
If a checkbox is unchecked, return \"Not checked\"; otherwise, extract the information.
Respond only with the results in JSON format.
The JSON object should include the following fields: 'CustomerName', 'CustomerId', 'PurchaseOrder', 'InvoiceId', 'InvoiceDate', 'DueDate', 'VendorName', 'VendorAddress', 'VendorAddressRecipient', 'CustomerAddress', 'CustomerAddressRecipient', 'BillingAddress', 'BillingAddressRecipient', 'ShippingAddress', 'ShippingAddressRecipient', 'SubTotal', 'TotalDiscount', 'TotalTax', 'InvoiceTotal', 'AmountDue', 'PreviousUnpaidBalance', 'RemittanceAddress', 'RemittanceAddressRecipient', 'ServiceAddress', 'ServiceAddressRecipient', 'ServiceStartDate', 'ServiceEndDate', 'VendorTaxId', 'CustomerTaxId', 'PaymentTerm', 'KVKNumber', 'PaymentDetails', 'PaymentDetails(IBAN)', 'PaymentDetails(SWIFT)', 'PaymentDetails(BankAccountNumber)', 'PaymentDetails(BPayBillerCode)', 'PaymentDetails(BPayReference)', 'TaxDetails', 'TaxDetails(Amount)', 'TaxDetails(Rate)', 'PaidInFourInstallements', 'PaidInFourInstallements(Amount)', 'PaidInFourInstallements(DueDate)', 'Items', 'Items(Amount)', 'Items(Date)', 'Items(Description)', 'Items(Quantity)', 'Items(ProductCode)', 'Items(Tax)', 'Items(TaxRate)', 'Items(Unit)', and 'Items(UnitPrice)'.";

/// Build the user message that carries the document text.
pub fn user_message(text: &str) -> String {
    format!("Please extract the data from the following document text:\n\n{text}")
}

/// Top-level keys of `data` that are not part of [`INVOICE_FIELDS`].
pub fn unknown_fields(data: &InvoiceData) -> Vec<String> {
    data.keys()
        .filter(|k| !INVOICE_FIELDS.contains(&k.as_str()))
        .cloned()
        .collect()
}
